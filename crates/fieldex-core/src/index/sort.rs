use crate::{
    index::{DocId, DocIdSet, FieldIndex},
    value::Value,
};
use serde::{Deserialize, Serialize};

// Below this result-to-index size ratio, sorting looked-up values beats
// walking every forward bucket.
const LOOKUP_SORT_DIVISOR: usize = 4;

///
/// Direction
///
/// Traversal order for `sort_documents`.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FieldIndex {
    /// Order `ids` by their indexed value.
    ///
    /// Ids the index does not reference are dropped. Ids sharing a value
    /// keep ascending docid order in both directions. `limit` caps the
    /// output length.
    #[must_use]
    pub fn sort_documents(
        &self,
        ids: &DocIdSet,
        direction: Direction,
        limit: Option<usize>,
    ) -> Vec<DocId> {
        let limit = limit.unwrap_or(usize::MAX);
        if limit == 0 || ids.is_empty() {
            return Vec::new();
        }

        if ids.len().saturating_mul(LOOKUP_SORT_DIVISOR) < self.num_objects() {
            self.sort_by_lookup(ids, direction, limit)
        } else {
            self.sort_by_walk(ids, direction, limit)
        }
    }

    // Small result sets: fetch each id's value and sort the pairs.
    fn sort_by_lookup(&self, ids: &DocIdSet, direction: Direction, limit: usize) -> Vec<DocId> {
        let mut keyed: Vec<(&Value, DocId)> = ids
            .iter()
            .filter_map(|id| self.backward.get(id).map(|value| (value, *id)))
            .collect();

        keyed.sort_by(|(a_value, a_id), (b_value, b_id)| {
            let by_value = match direction {
                Direction::Asc => a_value.cmp(b_value),
                Direction::Desc => b_value.cmp(a_value),
            };
            by_value.then_with(|| a_id.cmp(b_id))
        });

        keyed.into_iter().take(limit).map(|(_, id)| id).collect()
    }

    // Large result sets: walk buckets in key order and keep members.
    fn sort_by_walk(&self, ids: &DocIdSet, direction: Direction, limit: usize) -> Vec<DocId> {
        let buckets: Box<dyn Iterator<Item = &DocIdSet>> = match direction {
            Direction::Asc => Box::new(self.forward.values()),
            Direction::Desc => Box::new(self.forward.values().rev()),
        };

        buckets
            .flat_map(|bucket| bucket.iter().filter(|id| ids.contains(*id)).copied())
            .take(limit)
            .collect()
    }
}
