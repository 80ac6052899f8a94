use crate::index::DocId;
use derive_more::{Deref, DerefMut, IntoIterator};
use std::collections::BTreeSet;

///
/// DocIdSet
///
/// Ordered set of document ids. Used both as a forward-index bucket and as
/// the result container handed back to callers; an empty set is still a
/// valid result.
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct DocIdSet(BTreeSet<DocId>);

impl DocIdSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Ids in ascending order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<DocId> {
        self.0.iter().copied().collect()
    }

    /// Merge another set into this one.
    pub fn union_with(&mut self, other: &Self) {
        if self.0.is_empty() {
            self.0.clone_from(&other.0);
        } else {
            self.0.extend(other.0.iter().copied());
        }
    }

    /// Keep only ids also present in `other`.
    pub fn intersect_with(&mut self, other: &Self) {
        self.0.retain(|id| other.0.contains(id));
    }

    /// Union of many sets.
    #[must_use]
    pub fn union_all<'a>(sets: impl IntoIterator<Item = &'a Self>) -> Self {
        let mut out = Self::new();
        for set in sets {
            out.union_with(set);
        }

        out
    }

    /// Intersection of many sets; empty when given none.
    #[must_use]
    pub fn intersect_all<'a>(sets: impl IntoIterator<Item = &'a Self>) -> Self {
        // Intersect smallest first so the working set shrinks fastest.
        let mut sets: Vec<&Self> = sets.into_iter().collect();
        sets.sort_by_key(|set| set.len());

        let mut iter = sets.into_iter();
        let Some(first) = iter.next() else {
            return Self::new();
        };

        let mut out = first.clone();
        for set in iter {
            if out.is_empty() {
                break;
            }
            out.intersect_with(set);
        }

        out
    }
}

impl FromIterator<DocId> for DocIdSet {
    fn from_iter<I: IntoIterator<Item = DocId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[DocId; N]> for DocIdSet {
    fn from(ids: [DocId; N]) -> Self {
        Self(BTreeSet::from(ids))
    }
}
