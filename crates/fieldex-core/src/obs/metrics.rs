use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for index operations.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub indexes: BTreeMap<String, IndexCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Mutation
    pub index_inserts: u64,
    pub index_removes: u64,
    pub values_rejected: u64,

    // Query kinds
    pub query_keys: u64,
    pub query_range: u64,
    pub query_full_scan: u64,

    // Query volume
    pub keys_scanned: u64,
    pub docs_matched: u64,
}

///
/// IndexCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct IndexCounters {
    pub index_inserts: u64,
    pub index_removes: u64,
    pub values_rejected: u64,
    pub queries: u64,
    pub keys_scanned: u64,
    pub docs_matched: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
/// Point-in-time copy of the counters plus per-index averages.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    pub counters: EventState,
    pub index_summaries: Vec<IndexSummary>,
}

///
/// IndexSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct IndexSummary {
    pub index: String,
    pub queries: u64,
    pub docs_matched: u64,
    pub avg_docs_per_query: f64,
    pub avg_keys_per_query: f64,
}

#[expect(clippy::cast_precision_loss)]
fn avg(total: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Build a report from the current state, busiest indexes first.
#[must_use]
pub(crate) fn report() -> EventReport {
    with_state(|m| {
        let mut index_summaries: Vec<IndexSummary> = m
            .indexes
            .iter()
            .map(|(index, c)| IndexSummary {
                index: index.clone(),
                queries: c.queries,
                docs_matched: c.docs_matched,
                avg_docs_per_query: avg(c.docs_matched, c.queries),
                avg_keys_per_query: avg(c.keys_scanned, c.queries),
            })
            .collect();

        index_summaries.sort_by(|a, b| {
            b.queries
                .cmp(&a.queries)
                .then_with(|| a.index.cmp(&b.index))
        });

        EventReport {
            counters: m.clone(),
            index_summaries,
        }
    })
}
