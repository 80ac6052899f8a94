use crate::{
    index::{AttributeSource, DocId, DocIdSet, Direction, Extracted, FieldIndex, IndexConfig},
    query::{IndexRequest, Operator, QueryRecord},
    value::Value,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

// ---- helpers -----------------------------------------------------------

// Check forward/backward lockstep and bucket pruning.
fn assert_consistent(index: &FieldIndex) {
    for (value, ids) in &index.forward {
        assert!(!ids.is_empty(), "empty bucket left for {value}");
        assert!(!value.is_null(), "null key present");
        for id in ids {
            assert_eq!(index.backward.get(id), Some(value), "docid {id}");
        }
    }

    let forward_members: usize = index.forward.values().map(|ids| ids.len()).sum();
    assert_eq!(forward_members, index.backward.len());
}

fn text(s: &str) -> Value {
    Value::from(s)
}

struct Doc(BTreeMap<&'static str, Value>);

impl AttributeSource for Doc {
    fn extract(&self, attribute: &str) -> Extracted {
        self.0.get(attribute).cloned().into()
    }
}

// ---- mutation ----------------------------------------------------------

#[test]
fn reindex_moves_document_and_prunes_old_bucket() {
    let mut index = FieldIndex::new("foo");
    index.index_object(1, text("a")).unwrap();
    index.index_object(1, text("b")).unwrap();

    assert!(index.documents_for(&text("a")).is_none());
    assert_eq!(index.documents_for(&text("b")), Some(&DocIdSet::from([1])));
    assert_consistent(&index);
}

#[test]
fn reindex_with_same_value_reports_no_change() {
    let mut index = FieldIndex::new("foo");

    assert!(index.index_object(1, text("a")).unwrap());
    let before = (index.forward.clone(), index.backward.clone());
    assert!(!index.index_object(1, text("a")).unwrap());

    assert_eq!((index.forward.clone(), index.backward.clone()), before);
}

#[test]
fn null_leaves_prior_entry_untouched() {
    let mut index = FieldIndex::new("foo");
    index.index_object(3, text("keep")).unwrap();

    let err = index.index_object(3, Value::Null).unwrap_err();

    assert!(err.is_invalid_value());
    assert_eq!(err.to_string(), "null cannot be indexed");
    assert_eq!(index.entry_for_object(3), Some(&text("keep")));
    assert_consistent(&index);
}

#[test]
fn absent_extraction_unindexes() {
    let mut index = FieldIndex::new("foo");
    index.index_object(3, text("gone")).unwrap();

    assert!(index.index_object(3, Extracted::Absent).unwrap());
    assert!(index.is_empty());
    assert_eq!(index.num_objects(), 0);
    assert!(!index.index_object(3, Extracted::Absent).unwrap());
}

#[test]
fn clear_drops_everything() {
    let mut index = FieldIndex::new("foo");
    for id in 0..5 {
        index.index_object(id, Value::from(id)).unwrap();
    }

    index.clear();

    assert_eq!(index.len(), 0);
    assert_eq!(index.referenced_objects().len(), 0);
}

// ---- extraction --------------------------------------------------------

#[test]
fn index_document_reads_first_resolving_source() {
    let config = IndexConfig::new("title").with_indexed_attrs(["headline", "name"]);
    let mut index = FieldIndex::with_config(config);
    let doc = Doc(BTreeMap::from([("name", text("fallback"))]));

    index.index_document(1, &doc).unwrap();

    assert_eq!(index.config().indexed_attrs, ["headline", "name"]);
    assert_eq!(index.index_source_names(), vec!["headline", "name"]);
    assert_eq!(index.index_query_names(), vec!["title"]);
    assert_eq!(index.key_for_document(1).unwrap(), &text("fallback"));
}

#[test]
fn index_document_without_attribute_unindexes() {
    let mut index = FieldIndex::new("foo");
    index.index_document(1, &Doc(BTreeMap::from([("foo", text("x"))]))).unwrap();

    index.index_document(1, &Doc(BTreeMap::new())).unwrap();

    assert!(index.key_for_document(1).unwrap_err().is_not_found());
}

#[test]
fn config_deserializes_with_default_attrs() {
    let config: IndexConfig = serde_json::from_str(r#"{"id": "foo"}"#).unwrap();

    assert_eq!(config, IndexConfig::new("foo"));
    assert_eq!(config.source_names(), vec!["foo"]);
}

// ---- unique values -----------------------------------------------------

#[test]
fn unique_values_are_restartable_and_scoped() {
    let mut index = FieldIndex::new("foo");
    for (id, v) in [(1, "b"), (2, "a"), (3, "b")] {
        index.index_object(id, text(v)).unwrap();
    }

    let values = index.unique_values(Some("foo"));
    let first: Vec<_> = values.clone().collect();
    let second: Vec<_> = values.collect();

    assert_eq!(first, vec![&text("a"), &text("b")]);
    assert_eq!(first, second);
    assert_eq!(index.unique_values(None).len(), 2);
    assert_eq!(index.unique_values(Some("bar")).count(), 0);
}

#[test]
fn unique_values_with_lengths_and_histogram() {
    let mut index = FieldIndex::new("foo");
    for (id, v) in [(1, "x"), (2, "x"), (3, "y"), (4, "z"), (5, "x")] {
        index.index_object(id, text(v)).unwrap();
    }

    let lengths: Vec<_> = index.unique_values_with_lengths(None).collect();
    assert_eq!(lengths, vec![(&text("x"), 3), (&text("y"), 1), (&text("z"), 1)]);
    assert_eq!(index.unique_values_with_lengths(Some("bar")).count(), 0);
    assert_eq!(index.histogram(), BTreeMap::from([(1, 2), (3, 1)]));
}

// ---- query -------------------------------------------------------------

#[test]
fn and_over_explicit_keys_intersects_buckets() {
    let mut index = FieldIndex::new("foo");
    index.index_object(1, text("a")).unwrap();
    index.index_object(2, text("b")).unwrap();

    let and_two = IndexRequest::new().with(
        "foo",
        QueryRecord::new().query(["a", "b"]).operator(Operator::And),
    );
    let and_one = IndexRequest::new().with(
        "foo",
        QueryRecord::new().query(["a"]).operator(Operator::And),
    );
    let and_missing = IndexRequest::new().with(
        "foo",
        QueryRecord::new().query(["a", "nope"]).operator(Operator::And),
    );

    assert!(index.apply_index(&and_two).unwrap().unwrap().ids.is_empty());
    assert_eq!(index.apply_index(&and_one).unwrap().unwrap().ids.to_vec(), vec![1]);
    assert!(index.apply_index(&and_missing).unwrap().unwrap().ids.is_empty());
}

#[test]
fn numerically_equal_values_share_one_bucket() {
    let mut index = FieldIndex::new("foo");
    index.index_object(1, Value::from(0u32)).unwrap();
    index.index_object(2, Value::from(0i32)).unwrap();
    index.index_object(3, Value::Uint(0)).unwrap();
    index.index_object(4, Value::float(0.0).unwrap()).unwrap();
    index.index_object(5, Value::from(1i64)).unwrap();

    assert_eq!(index.index_size(), 2);
    assert_eq!(index.unique_values(None).len(), 2);
    assert_eq!(index.histogram(), BTreeMap::from([(1, 1), (4, 1)]));
    assert_consistent(&index);

    // same value through another type is not a change
    assert!(!index.index_object(5, Value::float(1.0).unwrap()).unwrap());

    let cases: [(&str, Vec<DocId>); 4] = [
        (r#"{"foo": 0}"#, vec![1, 2, 3, 4]),
        (r#"{"foo": 0.0}"#, vec![1, 2, 3, 4]),
        (r#"{"foo": 1.0}"#, vec![5]),
        (r#"{"foo": {"query": [0.5, 1], "range": "min:max"}}"#, vec![5]),
    ];

    for (json, expected) in cases {
        let request: IndexRequest = serde_json::from_str(json).unwrap();
        let result = index.apply_index(&request).unwrap().unwrap();
        assert_eq!(result.ids.to_vec(), expected, "{json}");
    }
}

#[test]
fn record_without_query_or_not_is_not_applicable() {
    let index = FieldIndex::new("foo");
    let request = IndexRequest::new().with("foo", QueryRecord::new());

    assert_eq!(index.apply_index(&request).unwrap(), None);
}

// ---- sorting -----------------------------------------------------------

fn sort_fixture() -> FieldIndex {
    let mut index = FieldIndex::new("foo");
    for (id, v) in [(10, 3), (11, 1), (12, 2), (13, 1), (14, 5), (15, 4), (16, 0), (17, 9)] {
        index.index_object(id, Value::from(v)).unwrap();
    }

    index
}

#[test]
fn sort_documents_orders_by_value_then_docid() {
    let index = sort_fixture();
    let all: DocIdSet = index.referenced_objects().collect();

    assert_eq!(
        index.sort_documents(&all, Direction::Asc, None),
        vec![16, 11, 13, 12, 10, 15, 14, 17]
    );
    assert_eq!(
        index.sort_documents(&all, Direction::Desc, Some(4)),
        vec![17, 14, 15, 10]
    );
}

#[test]
fn sort_documents_lookup_path_matches_walk_path() {
    let mut index = sort_fixture();
    for id in 100..120 {
        index.index_object(id, Value::from(50)).unwrap();
    }
    // Small enough to take the lookup path; 99 is unknown and dropped.
    let few = DocIdSet::from([13, 11, 99]);

    assert_eq!(index.sort_documents(&few, Direction::Asc, None), vec![11, 13]);
    assert_eq!(index.sort_documents(&few, Direction::Desc, None), vec![11, 13]);
    assert!(index.sort_documents(&few, Direction::Asc, Some(0)).is_empty());
}

// ---- invariants --------------------------------------------------------

#[derive(Clone, Debug)]
enum Op {
    Index(DocId, Option<u8>),
    Null(DocId),
    Unindex(DocId),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u64..12, proptest::option::of(0u8..5)).prop_map(|(id, v)| Op::Index(id, v)),
        1 => (0u64..12).prop_map(Op::Null),
        2 => (0u64..12).prop_map(Op::Unindex),
    ]
}

proptest! {
    #[test]
    fn forward_and_backward_stay_in_lockstep(ops in proptest::collection::vec(arb_op(), 0..64)) {
        let mut index = FieldIndex::new("foo");
        let mut model: BTreeMap<DocId, Value> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Index(id, v) => {
                    let extracted = Extracted::from(v);
                    index.index_object(id, extracted.clone()).unwrap();
                    match extracted {
                        Extracted::Value(value) => { model.insert(id, value); }
                        Extracted::Absent => { model.remove(&id); }
                    }
                }
                Op::Null(id) => {
                    prop_assert!(index.index_object(id, Value::Null).is_err());
                }
                Op::Unindex(id) => {
                    index.unindex_object(id);
                    model.remove(&id);
                }
            }
            assert_consistent(&index);
        }

        prop_assert_eq!(index.document_to_key_map(), &model);
        prop_assert_eq!(index.num_objects(), model.len());
        let distinct: std::collections::BTreeSet<_> = model.values().collect();
        prop_assert_eq!(index.index_size(), distinct.len());
    }
}
