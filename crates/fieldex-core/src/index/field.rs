use crate::{
    error::InternalError,
    index::{AttributeSource, DocId, DocIdSet, Extracted, IndexConfig},
    obs::sink::{self, MetricsEvent},
    value::Value,
};
use std::collections::{BTreeMap, btree_map};

///
/// FieldIndex
///
/// Single-attribute value index.
///
/// Invariants:
/// - every forward key maps to a non-empty bucket
/// - `backward[d] == v` iff `d` is in `forward[v]`, and in no other bucket
/// - `Value::Null` is never a key
///
/// Mutations validate before touching either map, so a failed call leaves
/// the index exactly as it was.
///

#[derive(Clone, Debug)]
pub struct FieldIndex {
    config: IndexConfig,
    pub(super) forward: BTreeMap<Value, DocIdSet>,
    pub(super) backward: BTreeMap<DocId, Value>,
}

impl FieldIndex {
    /// Index reading and answering for the attribute `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_config(IndexConfig::new(id))
    }

    #[must_use]
    pub const fn with_config(config: IndexConfig) -> Self {
        Self {
            config,
            forward: BTreeMap::new(),
            backward: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.config.id
    }

    #[must_use]
    pub const fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Attributes read from documents.
    #[must_use]
    pub fn index_source_names(&self) -> Vec<&str> {
        self.config.source_names()
    }

    /// Request keys this index answers for.
    #[must_use]
    pub fn index_query_names(&self) -> Vec<&str> {
        vec![self.id()]
    }

    ///
    /// MUTATION
    ///

    /// Record `docid`'s current value.
    ///
    /// `Extracted::Absent` unindexes the document. A null value is rejected
    /// and the document keeps whatever entry it had. Returns whether the
    /// index changed.
    pub fn index_object(
        &mut self,
        docid: DocId,
        extracted: impl Into<Extracted>,
    ) -> Result<bool, InternalError> {
        let value = match extracted.into() {
            Extracted::Value(Value::Null) => {
                sink::record(MetricsEvent::ValueRejected { index: self.id() });
                return Err(InternalError::null_not_indexable());
            }
            Extracted::Value(value) => value,
            Extracted::Absent => return Ok(self.unindex_object(docid)),
        };

        if self.backward.get(&docid) == Some(&value) {
            return Ok(false);
        }

        let removes = u64::from(self.remove_forward(docid));
        self.forward
            .entry(value.clone())
            .or_default()
            .insert(docid);
        self.backward.insert(docid, value);

        sink::record(MetricsEvent::IndexDelta {
            index: self.id(),
            inserts: 1,
            removes,
        });

        Ok(true)
    }

    /// Read the document through the configured source names and index the
    /// first attribute that resolves.
    pub fn index_document<S>(&mut self, docid: DocId, source: &S) -> Result<bool, InternalError>
    where
        S: AttributeSource + ?Sized,
    {
        let extracted = self
            .config
            .source_names()
            .into_iter()
            .map(|name| source.extract(name))
            .find(|extracted| extracted.value().is_some())
            .unwrap_or(Extracted::Absent);

        self.index_object(docid, extracted)
    }

    /// Drop `docid` from both maps; a no-op for unknown ids.
    /// Returns whether the document was indexed.
    pub fn unindex_object(&mut self, docid: DocId) -> bool {
        let removed = self.remove_forward(docid);
        if removed {
            sink::record(MetricsEvent::IndexDelta {
                index: self.id(),
                inserts: 0,
                removes: 1,
            });
        }

        removed
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.forward.clear();
        self.backward.clear();
    }

    // Detach `docid` from its backward entry and forward bucket, pruning the
    // bucket when it empties.
    fn remove_forward(&mut self, docid: DocId) -> bool {
        let Some(old) = self.backward.remove(&docid) else {
            return false;
        };

        if let btree_map::Entry::Occupied(mut bucket) = self.forward.entry(old) {
            bucket.get_mut().remove(&docid);
            if bucket.get().is_empty() {
                bucket.remove();
            }
        }

        true
    }

    ///
    /// LOOKUP
    ///

    /// Current value of `docid`, if indexed.
    #[must_use]
    pub fn entry_for_object(&self, docid: DocId) -> Option<&Value> {
        self.backward.get(&docid)
    }

    /// Current value of `docid`, or `default` when unindexed.
    #[must_use]
    pub fn entry_for_object_or<'a>(&'a self, docid: DocId, default: &'a Value) -> &'a Value {
        self.backward.get(&docid).unwrap_or(default)
    }

    /// Current value of `docid`; unindexed documents are an error.
    pub fn key_for_document(&self, docid: DocId) -> Result<&Value, InternalError> {
        self.backward
            .get(&docid)
            .ok_or_else(|| InternalError::document_not_found(docid))
    }

    /// The backward map, ordered by docid.
    #[must_use]
    pub const fn document_to_key_map(&self) -> &BTreeMap<DocId, Value> {
        &self.backward
    }

    /// Forward entries in key order.
    pub fn items(&self) -> impl DoubleEndedIterator<Item = (&Value, &DocIdSet)> + '_ {
        self.forward.iter()
    }

    /// Ids of the documents holding `value`.
    #[must_use]
    pub fn documents_for(&self, value: &Value) -> Option<&DocIdSet> {
        self.forward.get(value)
    }

    /// Every indexed document id.
    pub fn referenced_objects(&self) -> impl ExactSizeIterator<Item = DocId> + '_ {
        self.backward.keys().copied()
    }

    #[must_use]
    pub fn num_objects(&self) -> usize {
        self.backward.len()
    }

    /// Number of distinct values (not documents).
    #[must_use]
    pub fn index_size(&self) -> usize {
        self.forward.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index_size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    ///
    /// UNIQUE VALUES
    ///

    /// A field index supplies unique values for its own attribute only.
    #[must_use]
    pub fn has_unique_values_for(&self, attribute: &str) -> bool {
        attribute == self.id()
    }

    /// Distinct values present, in key order. Naming another attribute
    /// yields an empty sequence.
    #[must_use]
    pub fn unique_values(&self, attribute: Option<&str>) -> UniqueValues<'_> {
        let inner = self.answers_for(attribute).then(|| self.forward.keys());

        UniqueValues { inner }
    }

    /// Distinct values paired with how many documents hold each.
    pub fn unique_values_with_lengths(
        &self,
        attribute: Option<&str>,
    ) -> impl Iterator<Item = (&Value, usize)> + '_ {
        let entries = self
            .answers_for(attribute)
            .then(|| self.forward.iter())
            .into_iter()
            .flatten();

        entries.map(|(value, ids)| (value, ids.len()))
    }

    /// Bucket size → number of values whose bucket has that size.
    #[must_use]
    pub fn histogram(&self) -> BTreeMap<usize, usize> {
        let mut histogram = BTreeMap::new();
        for ids in self.forward.values() {
            *histogram.entry(ids.len()).or_insert(0) += 1;
        }

        histogram
    }

    fn answers_for(&self, attribute: Option<&str>) -> bool {
        attribute.is_none_or(|name| self.has_unique_values_for(name))
    }
}

///
/// UniqueValues
///
/// Lazy view over the distinct values of an index. Cloning restarts the
/// sequence from the first value.
///

#[derive(Clone, Debug)]
pub struct UniqueValues<'a> {
    inner: Option<btree_map::Keys<'a, Value, DocIdSet>>,
}

impl<'a> Iterator for UniqueValues<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner
            .as_ref()
            .map_or((0, Some(0)), Iterator::size_hint)
    }
}

impl ExactSizeIterator for UniqueValues<'_> {}
