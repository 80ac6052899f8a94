use crate::{error::InternalError, value::Value};
use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Deserializer, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

///
/// IndexRequest
///
/// Attribute name → query. Each index consults only its own entry and
/// ignores the rest, so one request can be fanned out to many indexes.
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IndexRequest(BTreeMap<String, IndexQuery>);

impl IndexRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the query for one attribute.
    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, query: impl Into<IndexQuery>) -> Self {
        self.0.insert(attribute.into(), query.into());
        self
    }

    #[must_use]
    pub fn query_for(&self, attribute: &str) -> Option<&IndexQuery> {
        self.0.get(attribute)
    }
}

///
/// IndexQuery
///
/// Bare scalar, bare list (OR-group), or structured sub-request.
/// Variant order matters for untagged decoding: scalars first, maps last.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IndexQuery {
    Value(Value),
    Values(Vec<Value>),
    Record(QueryRecord),
}

impl IndexQuery {
    #[must_use]
    pub fn exact(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    #[must_use]
    pub fn any_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Values(values.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for IndexQuery {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<QueryRecord> for IndexQuery {
    fn from(record: QueryRecord) -> Self {
        Self::Record(record)
    }
}

///
/// QueryRecord
///
/// Structured sub-request. Every field is optional; see `resolve` for how the
/// combinations select keys.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueryRecord {
    #[serde(
        default,
        deserialize_with = "present_values",
        skip_serializing_if = "Option::is_none"
    )]
    pub query: Option<QueryValues>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeKind>,

    #[serde(
        default,
        deserialize_with = "present_values",
        skip_serializing_if = "Option::is_none"
    )]
    pub not: Option<QueryValues>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
}

impl QueryRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(mut self, values: impl Into<QueryValues>) -> Self {
        self.query = Some(values.into());
        self
    }

    #[must_use]
    pub const fn range(mut self, range: RangeKind) -> Self {
        self.range = Some(range);
        self
    }

    #[must_use]
    pub fn not(mut self, values: impl Into<QueryValues>) -> Self {
        self.not = Some(values.into());
        self
    }

    #[must_use]
    pub const fn operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }
}

// A field that is present is always `Some`; an explicit `null` decodes to
// `Value::Null` so resolution rejects it instead of treating it as absent.
fn present_values<'de, D>(deserializer: D) -> Result<Option<QueryValues>, D::Error>
where
    D: Deserializer<'de>,
{
    QueryValues::deserialize(deserializer).map(Some)
}

///
/// QueryValues
///
/// One value or many; a single value behaves like a one-element list.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryValues {
    One(Value),
    Many(Vec<Value>),
}

impl QueryValues {
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values.as_slice(),
        }
    }
}

macro_rules! impl_query_values_from {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl From<$type> for QueryValues {
                fn from(v: $type) -> Self {
                    Self::One(v.into())
                }
            }
        )*
    };
}

impl_query_values_from!(Value, bool, i32, i64, u64, &str, String);

impl From<Vec<Value>> for QueryValues {
    fn from(values: Vec<Value>) -> Self {
        Self::Many(values)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for QueryValues {
    fn from(values: [T; N]) -> Self {
        Self::Many(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> FromIterator<T> for QueryValues {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Many(iter.into_iter().map(Into::into).collect())
    }
}

///
/// RangeKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RangeKind {
    /// keys ≥ the smallest query value
    #[serde(rename = "min")]
    Min,

    /// keys ≤ the largest query value
    #[serde(rename = "max")]
    Max,

    /// keys within the closed interval spanned by the query values
    #[serde(rename = "min:max")]
    MinMax,
}

impl RangeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::MinMax => "min:max",
        }
    }
}

impl FromStr for RangeKind {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "min:max" => Ok(Self::MinMax),
            other => Err(InternalError::unknown_range(other)),
        }
    }
}

impl fmt::Display for RangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// Operator
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    #[default]
    Or,
    And,
}

impl FromStr for Operator {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "or" => Ok(Self::Or),
            "and" => Ok(Self::And),
            other => Err(InternalError::unknown_operator(other)),
        }
    }
}
