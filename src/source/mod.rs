//! Data source layer
//!
//! Turns a metadata CSV on disk into an immutable, shareable [`Dataset`].

pub(crate) mod cache;
pub(crate) mod loader;
pub(crate) mod parser;

use crate::core::Record;

pub(crate) use cache::{DatasetCache, DiskCache, SourceKey};
pub(crate) use loader::DataLoader;

/// A loaded table; never mutated after construction
#[derive(Debug)]
pub(crate) struct Dataset {
    pub(crate) key: SourceKey,
    pub(crate) records: Vec<Record>,
    /// Header names as they appeared in the file
    pub(crate) columns: Vec<String>,
}
