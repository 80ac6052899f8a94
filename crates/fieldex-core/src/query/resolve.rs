use crate::{
    error::InternalError,
    query::{IndexQuery, Operator, QueryRecord, QueryValues, RangeKind},
    value::Value,
};
use std::{collections::BTreeSet, ops::Bound};

///
/// KeySelection
///
/// Which forward-index keys a query nominates before exclusion.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum KeySelection {
    /// Exactly these keys, whether or not they are populated.
    Keys(BTreeSet<Value>),

    /// Every populated key within the bounds, visited in key order.
    Range { lower: Bound<Value>, upper: Bound<Value> },

    /// Every populated key; produced by exclusion-only records.
    All,
}

///
/// ResolvedQuery
///
/// One attribute's query after validation: nominated keys, excluded keys, and
/// the operator used to combine explicit keys.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ResolvedQuery {
    pub(crate) selection: KeySelection,
    pub(crate) exclude: BTreeSet<Value>,
    pub(crate) operator: Operator,
}

impl ResolvedQuery {
    /// Resolve an attribute's query.
    ///
    /// Returns `Ok(None)` for a record that names neither `query` nor `not`;
    /// such a record carries nothing this index can answer.
    pub(crate) fn resolve(query: &IndexQuery) -> Result<Option<Self>, InternalError> {
        match query {
            IndexQuery::Value(value) => Ok(Some(Self::keys(std::slice::from_ref(value))?)),
            IndexQuery::Values(values) => Ok(Some(Self::keys(values)?)),
            IndexQuery::Record(record) => Self::resolve_record(record),
        }
    }

    fn keys(values: &[Value]) -> Result<Self, InternalError> {
        Ok(Self {
            selection: KeySelection::Keys(collect_keys(values)?),
            exclude: BTreeSet::new(),
            operator: Operator::Or,
        })
    }

    fn resolve_record(record: &QueryRecord) -> Result<Option<Self>, InternalError> {
        let exclude = match &record.not {
            Some(values) => collect_keys(values.as_slice())?,
            None => BTreeSet::new(),
        };
        let operator = record.operator.unwrap_or_default();

        let selection = match (&record.query, record.range) {
            (Some(query), None) => KeySelection::Keys(collect_keys(query.as_slice())?),
            (Some(query), Some(range)) => range_selection(query, range)?,
            (None, _) if record.not.is_some() => KeySelection::All,
            (None, _) => return Ok(None),
        };

        Ok(Some(Self {
            selection,
            exclude,
            operator,
        }))
    }
}

// Null is never a key; asking for it is an error, not an empty match.
fn collect_keys(values: &[Value]) -> Result<BTreeSet<Value>, InternalError> {
    if values.iter().any(Value::is_null) {
        return Err(InternalError::null_not_queryable());
    }

    Ok(values.iter().cloned().collect())
}

// Bounds come from the smallest and largest supplied values, so
// `(high, low)` spans the same interval as `(low, high)`.
fn range_selection(query: &QueryValues, range: RangeKind) -> Result<KeySelection, InternalError> {
    let keys = collect_keys(query.as_slice())?;
    let (Some(low), Some(high)) = (keys.first(), keys.last()) else {
        // An empty value list nominates nothing.
        return Ok(KeySelection::Keys(BTreeSet::new()));
    };

    let (lower, upper) = match range {
        RangeKind::Min => (Bound::Included(low.clone()), Bound::Unbounded),
        RangeKind::Max => (Bound::Unbounded, Bound::Included(high.clone())),
        RangeKind::MinMax => (Bound::Included(low.clone()), Bound::Included(high.clone())),
    };

    Ok(KeySelection::Range { lower, upper })
}
