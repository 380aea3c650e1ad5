//! Usage counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Lock-free counters updated by every request.
#[derive(Debug, Default)]
pub struct EngineStats {
    requests: AtomicU64,
    default_model_calls: AtomicU64,
    experiment_model_calls: AtomicU64,
    qa_lookups: AtomicU64,
    model_results: AtomicU64,
    cascade_results: AtomicU64,
}

/// A point-in-time copy of [`EngineStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Requests answered.
    pub requests: u64,
    /// Requests scored by the default model.
    pub default_model_calls: u64,
    /// Requests scored by the experiment model.
    pub experiment_model_calls: u64,
    /// Requests answered from the QA table.
    pub qa_lookups: u64,
    /// Model scores that produced a day.
    pub model_results: u64,
    /// Eligible cascade requests that produced an estimate.
    pub cascade_results: u64,
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl EngineStats {
    pub(crate) fn record_request(&self) {
        bump(&self.requests);
    }

    pub(crate) fn record_default_model(&self) {
        bump(&self.default_model_calls);
    }

    pub(crate) fn record_experiment_model(&self) {
        bump(&self.experiment_model_calls);
    }

    pub(crate) fn record_qa_lookup(&self) {
        bump(&self.qa_lookups);
    }

    pub(crate) fn record_model_result(&self) {
        bump(&self.model_results);
    }

    pub(crate) fn record_cascade_result(&self) {
        bump(&self.cascade_results);
    }

    /// Returns the current counts.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            default_model_calls: self.default_model_calls.load(Ordering::Relaxed),
            experiment_model_calls: self.experiment_model_calls.load(Ordering::Relaxed),
            qa_lookups: self.qa_lookups.load(Ordering::Relaxed),
            model_results: self.model_results.load(Ordering::Relaxed),
            cascade_results: self.cascade_results.load(Ordering::Relaxed),
        }
    }
}
