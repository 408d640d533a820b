//! Per-session simulation state: one baseline slot plus the append-only
//! list of recorded scenario results.
//!
//! A session is owned by exactly one user and driven synchronously, so no
//! locking is involved. Replacing the baseline (a role change) leaves the
//! recorded results in place — only the explicit [`SimulationSession::clear_results`]
//! call empties the list.

use serde::{Deserialize, Serialize};

use crate::simulation::{compare_simulations, Baseline, SimulationComparison, SimulationResult};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SimulationSession {
    baseline: Option<Baseline>,
    results: Vec<SimulationResult>,
}

impl SimulationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    /// Installs or replaces the baseline. Called on every role (re)selection.
    pub fn set_baseline(&mut self, baseline: Baseline) {
        self.baseline = Some(baseline);
    }

    /// Appends a scenario result for later side-by-side comparison.
    pub fn record(&mut self, result: SimulationResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[SimulationResult] {
        &self.results
    }

    /// Empties the recorded results. Explicit user action only.
    pub fn clear_results(&mut self) {
        self.results.clear();
    }

    /// Ranked projection of everything recorded so far.
    pub fn compare(&self) -> Vec<SimulationComparison> {
        compare_simulations(&self.results)
    }
}
