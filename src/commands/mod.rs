//! CLI command implementations

pub mod clean;
pub mod export;
pub mod list;
pub mod query;
pub mod render;
pub mod show;
