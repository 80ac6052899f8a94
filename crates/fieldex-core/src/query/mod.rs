//! Module: query
//! Responsibility: the request surface consumed by `FieldIndex::apply_index`.
//! Does not own: key-space traversal or docid set algebra.
//! Boundary: callers build or deserialize an `IndexRequest`; the index
//! resolves its own entry into a `KeySelection`.

mod request;
mod resolve;


pub use request::{IndexQuery, IndexRequest, Operator, QueryRecord, QueryValues, RangeKind};
pub(crate) use resolve::{KeySelection, ResolvedQuery};
