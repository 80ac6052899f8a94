//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Index code never touches metrics state directly; it emits
//! [`MetricsEvent`]s through [`sink::record`].

pub(crate) mod metrics;
pub(crate) mod sink;

#[cfg(test)]
mod tests;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, IndexCounters, IndexSummary};
pub use sink::{
    MetricsEvent, MetricsSink, QueryKind, metrics_report, metrics_reset_all, with_metrics_sink,
};
