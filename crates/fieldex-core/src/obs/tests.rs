use crate::{
    index::FieldIndex,
    obs::{MetricsEvent, MetricsSink, QueryKind, metrics_report, metrics_reset_all, with_metrics_sink},
    query::{IndexRequest, QueryRecord, RangeKind},
    value::Value,
};
use std::{cell::RefCell, rc::Rc};

///
/// RecordingSink
///

#[derive(Default)]
struct RecordingSink {
    events: RefCell<Vec<String>>,
}

impl MetricsSink for RecordingSink {
    fn record(&self, event: MetricsEvent<'_>) {
        self.events.borrow_mut().push(format!("{event:?}"));
    }
}

fn populated() -> FieldIndex {
    let mut index = FieldIndex::new("foo");
    for id in 0..6u64 {
        index.index_object(id, Value::from(id % 3)).unwrap();
    }

    index
}

#[test]
fn override_sink_captures_events_and_restores() {
    let sink = Rc::new(RecordingSink::default());

    with_metrics_sink(sink.clone(), || {
        let mut index = FieldIndex::new("foo");
        index.index_object(1, Value::from("a")).unwrap();
        let _ = index.index_object(2, Value::Null);
        index.unindex_object(1);
    });

    assert_eq!(
        *sink.events.borrow(),
        vec![
            format!(
                "{:?}",
                MetricsEvent::IndexDelta { index: "foo", inserts: 1, removes: 0 }
            ),
            format!("{:?}", MetricsEvent::ValueRejected { index: "foo" }),
            format!(
                "{:?}",
                MetricsEvent::IndexDelta { index: "foo", inserts: 0, removes: 1 }
            ),
        ]
    );

    // Outside the scope events reach the global sink again.
    populated();
    assert_eq!(sink.events.borrow().len(), 3);
}

#[test]
fn global_sink_accumulates_query_counters() {
    metrics_reset_all();
    let index = populated();

    let range = IndexRequest::new().with("foo", QueryRecord::new().query(1u64).range(RangeKind::Min));
    let keys = IndexRequest::new().with("foo", Value::from(0u64));
    let scan = IndexRequest::new().with("foo", QueryRecord::new().not(2u64));
    for request in [&range, &keys, &scan] {
        index.apply_index(request).unwrap();
    }

    let report = metrics_report();
    let ops = &report.counters.ops;
    assert_eq!(ops.index_inserts, 6);
    assert_eq!(ops.query_range, 1);
    assert_eq!(ops.query_keys, 1);
    assert_eq!(ops.query_full_scan, 1);
    // range: keys 1,2 → 4 docs; keys: key 0 → 2 docs; scan: keys 0,1 → 4 docs
    assert_eq!(ops.keys_scanned, 5);
    assert_eq!(ops.docs_matched, 10);

    let summary = &report.index_summaries[0];
    assert_eq!(summary.index, "foo");
    assert_eq!(summary.queries, 3);
    assert!((summary.avg_docs_per_query - 10.0 / 3.0).abs() < f64::EPSILON);

    metrics_reset_all();
    assert_eq!(metrics_report().counters.ops.index_inserts, 0);
}

#[test]
fn query_events_report_kind() {
    let sink = Rc::new(RecordingSink::default());
    let index = populated();
    let request = IndexRequest::new().with("foo", Value::from(1u64));

    with_metrics_sink(sink.clone(), || index.apply_index(&request).unwrap());

    assert_eq!(
        *sink.events.borrow(),
        vec![format!(
            "{:?}",
            MetricsEvent::Query {
                index: "foo",
                kind: QueryKind::Keys,
                keys_scanned: 1,
                docs_matched: 2,
            }
        )]
    );
}
