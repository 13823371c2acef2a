// Metrics hooks for the linking layer.
//
// Callers install a global `LinkMetrics` implementation via [`set_link_metrics`];
// every `Linker::link` and `Linker::rank` call then reports its latency and
// candidate count without tying the crate to a metrics backend.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

/// Metrics observer for link operations.
pub trait LinkMetrics: Send + Sync {
    /// Record the outcome of one call.
    ///
    /// `entity_type` names the index searched, `candidate_count` is the number
    /// of entries left after constraint filtering and `matched` is true when at
    /// least one hit was returned.
    fn record_link(
        &self,
        entity_type: &str,
        latency: Duration,
        candidate_count: usize,
        matched: bool,
    );
}

type Recorder = RwLock<Option<Arc<dyn LinkMetrics>>>;

fn metrics_lock() -> &'static Recorder {
    static METRICS: OnceCell<Recorder> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn LinkMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global link metrics recorder.
pub fn set_link_metrics(recorder: Option<Arc<dyn LinkMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
