//! Shared building blocks for the catalog service crates.

pub mod types;
pub mod utils;
