//! Core runtime for Fieldex: values, the field index, its request model,
//! errors, and observability.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod index;
pub mod obs;
pub mod query;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        index::{
            AttributeSource, DocId, DocIdSet, Direction, Extracted, FieldIndex, IndexConfig,
            IndexResult,
        },
        query::{IndexQuery, IndexRequest, Operator, QueryRecord, QueryValues, RangeKind},
        value::Value,
    };
}
