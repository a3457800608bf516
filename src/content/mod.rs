//! Content module - posts, the post store, and content rendering

pub mod loader;
mod post;
pub mod render;
pub mod stats;
mod store;

pub use post::{Post, PostSummary};
pub use render::{ContentRenderer, Fragment, Stage, Trust};
pub use store::{PostStore, StoreError};
