//! Request evaluation for the field index.
//!
//! Exclusion works on candidate keys, not on the resulting ids: dropping a
//! key drops its whole bucket.

use crate::{
    error::InternalError,
    index::{DocIdSet, FieldIndex},
    obs::sink::{self, MetricsEvent, QueryKind},
    query::{IndexRequest, KeySelection, Operator, ResolvedQuery},
    value::Value,
};

///
/// IndexResult
///
/// Matching ids plus the attribute names consulted to produce them.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexResult {
    pub ids: DocIdSet,
    pub used: Vec<String>,
}

impl IndexResult {
    #[must_use]
    pub const fn ids(&self) -> &DocIdSet {
        &self.ids
    }

    #[must_use]
    pub fn used(&self) -> &[String] {
        &self.used
    }

    #[must_use]
    pub fn into_ids(self) -> DocIdSet {
        self.ids
    }
}

impl FieldIndex {
    /// Evaluate this index's entry of `request`.
    ///
    /// Returns `Ok(None)` when the request does not mention this index's
    /// attribute; an attribute with no matches yields an empty result.
    pub fn apply_index(&self, request: &IndexRequest) -> Result<Option<IndexResult>, InternalError> {
        let Some(query) = request.query_for(self.id()) else {
            return Ok(None);
        };
        let Some(resolved) = ResolvedQuery::resolve(query)? else {
            return Ok(None);
        };

        let (ids, kind, keys_scanned) = self.evaluate(&resolved);

        sink::record(MetricsEvent::Query {
            index: self.id(),
            kind,
            keys_scanned,
            docs_matched: ids.len() as u64,
        });

        Ok(Some(IndexResult {
            ids,
            used: vec![self.id().to_string()],
        }))
    }

    fn evaluate(&self, query: &ResolvedQuery) -> (DocIdSet, QueryKind, u64) {
        let exclude = &query.exclude;

        match &query.selection {
            KeySelection::Keys(keys) => {
                let candidates: Vec<&Value> =
                    keys.iter().filter(|key| !exclude.contains(*key)).collect();
                let scanned = candidates.len() as u64;

                let ids = match query.operator {
                    Operator::Or => DocIdSet::union_all(
                        candidates.iter().filter_map(|key| self.forward.get(*key)),
                    ),
                    // A nominated key without a bucket matches nothing, which
                    // empties the whole intersection.
                    Operator::And => {
                        let buckets: Option<Vec<&DocIdSet>> =
                            candidates.iter().map(|key| self.forward.get(*key)).collect();
                        buckets.map_or_else(DocIdSet::new, DocIdSet::intersect_all)
                    }
                };

                (ids, QueryKind::Keys, scanned)
            }

            // ranges always union; the operator only combines listed keys
            KeySelection::Range { lower, upper } => {
                let mut scanned = 0u64;
                let buckets = self
                    .forward
                    .range::<Value, _>((lower.as_ref(), upper.as_ref()))
                    .filter(|(key, _)| !exclude.contains(*key))
                    .inspect(|_| scanned += 1)
                    .map(|(_, ids)| ids);
                let ids = DocIdSet::union_all(buckets);

                (ids, QueryKind::Range, scanned)
            }

            KeySelection::All => {
                let mut scanned = 0u64;
                let buckets = self
                    .forward
                    .iter()
                    .filter(|(key, _)| !exclude.contains(*key))
                    .inspect(|_| scanned += 1)
                    .map(|(_, ids)| ids);
                let ids = DocIdSet::union_all(buckets);

                (ids, QueryKind::FullScan, scanned)
            }
        }
    }
}
