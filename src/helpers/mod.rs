//! Helper functions for presenting posts
//!
//! Date parsing and formatting for seed records and listings, and URL
//! building for post permalinks.

mod date;
mod url;

pub use date::*;
pub use url::*;
