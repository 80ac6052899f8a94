use crate::value::Value;

///
/// Canonical Value Rank
///
/// Rank used for cross-variant ordering. Numeric variants share one rank so
/// range scans interleave them by numeric value.
///
/// IMPORTANT:
/// Rank order decides which keys a range scan visits and must remain fixed.
///
#[must_use]
pub const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Float64(_) | Value::Int(_) | Value::Uint(_) => 2,
        Value::Text(_) => 3,
        Value::Blob(_) => 4,
    }
}
