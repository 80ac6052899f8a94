//! Metrics sink boundary.
//!
//! Index logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.

use crate::obs::metrics::{self, EventReport};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// QueryKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryKind {
    Keys,
    Range,
    FullScan,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent<'a> {
    IndexDelta {
        index: &'a str,
        inserts: u64,
        removes: u64,
    },
    ValueRejected {
        index: &'a str,
    },
    Query {
        index: &'a str,
        kind: QueryKind,
        keys_scanned: u64,
        docs_matched: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent<'_>);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into global metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent<'_>) {
        match event {
            MetricsEvent::IndexDelta {
                index,
                inserts,
                removes,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.index_inserts = m.ops.index_inserts.saturating_add(inserts);
                    m.ops.index_removes = m.ops.index_removes.saturating_add(removes);
                    let entry = m.indexes.entry(index.to_string()).or_default();
                    entry.index_inserts = entry.index_inserts.saturating_add(inserts);
                    entry.index_removes = entry.index_removes.saturating_add(removes);
                });
            }

            MetricsEvent::ValueRejected { index } => {
                metrics::with_state_mut(|m| {
                    m.ops.values_rejected = m.ops.values_rejected.saturating_add(1);
                    let entry = m.indexes.entry(index.to_string()).or_default();
                    entry.values_rejected = entry.values_rejected.saturating_add(1);
                });
            }

            MetricsEvent::Query {
                index,
                kind,
                keys_scanned,
                docs_matched,
            } => {
                metrics::with_state_mut(|m| {
                    match kind {
                        QueryKind::Keys => m.ops.query_keys = m.ops.query_keys.saturating_add(1),
                        QueryKind::Range => {
                            m.ops.query_range = m.ops.query_range.saturating_add(1);
                        }
                        QueryKind::FullScan => {
                            m.ops.query_full_scan = m.ops.query_full_scan.saturating_add(1);
                        }
                    }
                    m.ops.keys_scanned = m.ops.keys_scanned.saturating_add(keys_scanned);
                    m.ops.docs_matched = m.ops.docs_matched.saturating_add(docs_matched);

                    let entry = m.indexes.entry(index.to_string()).or_default();
                    entry.queries = entry.queries.saturating_add(1);
                    entry.keys_scanned = entry.keys_scanned.saturating_add(keys_scanned);
                    entry.docs_matched = entry.docs_matched.saturating_add(docs_matched);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent<'_>) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
