//! Edition loading and caching.
//!
//! - `EditionSource`: fetch-by-reference capability supplied by the host
//! - `EditionLoader`: parses, validates and memoizes editions by `EditionId`
//! - `LoadError`: unreachable, malformed or unplayable sources

pub mod cache;
pub mod error;
pub mod source;

pub use cache::EditionLoader;
pub use error::LoadError;
pub use source::{DirSource, EditionSource, MemorySource};
