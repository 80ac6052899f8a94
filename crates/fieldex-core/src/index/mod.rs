//! Module: index
//! Responsibility: the field index: forward (value → docids) and backward
//! (docid → value) maps kept in lockstep, plus request evaluation over them.
//! Does not own: attribute extraction or cross-index result merging.

mod apply;
mod config;
mod docset;
mod extract;
mod field;
mod sort;

#[cfg(test)]
mod tests;

pub use apply::IndexResult;
pub use config::IndexConfig;
pub use docset::DocIdSet;
pub use extract::{AttributeSource, Extracted};
pub use field::{FieldIndex, UniqueValues};
pub use sort::Direction;

/// Opaque catalog document identifier.
pub type DocId = u64;
