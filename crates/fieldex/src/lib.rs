//! ## Crate layout
//! - `core`: values, the field index, requests, errors, and observability.
//!
//! The `prelude` module mirrors the surface a catalog needs to build,
//! maintain, and query field indexes.

pub use fieldex_core as core;

pub use crate::core::error::InternalError as Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Catalog Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use serde::{Deserialize, Serialize};
}
