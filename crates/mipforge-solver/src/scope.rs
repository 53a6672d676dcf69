//! Solve-level scope.

use std::fmt::{self, Debug};
use std::time::{Duration, Instant};

use mipforge_core::{ModelId, SolutionSnapshot};

use crate::settings::SolveSettings;
use crate::statistics::SolveStatistics;
use crate::termination::Termination;

/// Progress counters visible to callbacks for every event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchProgress {
    pub node_count: u64,
    pub solution_count: u64,
    pub elapsed: Duration,
}

/// State of one running search.
///
/// The scope owns the incumbent. Backends replace it only through
/// [`commit_incumbent`](Self::commit_incumbent), which is the single point
/// where a new [`SolutionSnapshot`] becomes visible to callbacks.
pub struct SearchScope {
    model_id: ModelId,
    settings: SolveSettings,
    start_time: Instant,
    node_count: u64,
    solution_count: u64,
    incumbent: Option<SolutionSnapshot>,
    termination: Box<dyn Termination>,
    stop_requested: bool,
    statistics: SolveStatistics,
}

impl SearchScope {
    /// Creates a scope and starts its clock.
    pub fn new(
        model_id: ModelId,
        settings: SolveSettings,
        termination: Box<dyn Termination>,
    ) -> Self {
        Self {
            model_id,
            settings,
            start_time: Instant::now(),
            node_count: 0,
            solution_count: 0,
            incumbent: None,
            termination,
            stop_requested: false,
            statistics: SolveStatistics::new(),
        }
    }

    pub fn model_id(&self) -> ModelId {
        self.model_id
    }

    pub fn settings(&self) -> &SolveSettings {
        &self.settings
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    /// Counts one more explored node and returns the new total.
    pub fn increment_node_count(&mut self) -> u64 {
        self.node_count += 1;
        self.node_count
    }

    pub fn record_pruned(&mut self) {
        self.statistics.record_pruned();
    }

    pub fn record_presolve_tightenings(&mut self, count: u64) {
        self.statistics.presolve_tightenings += count;
    }

    pub fn solution_count(&self) -> u64 {
        self.solution_count
    }

    pub fn incumbent(&self) -> Option<&SolutionSnapshot> {
        self.incumbent.as_ref()
    }

    /// Objective value of the incumbent, if any.
    pub fn incumbent_objective(&self) -> Option<f64> {
        self.incumbent.as_ref().map(SolutionSnapshot::objective_value)
    }

    /// Replaces the incumbent with `values` and returns the committed snapshot.
    pub fn commit_incumbent(&mut self, values: Vec<f64>, objective_value: f64) -> &SolutionSnapshot {
        self.solution_count += 1;
        let elapsed = self.elapsed();
        self.statistics
            .record_improvement(elapsed, self.node_count, objective_value);
        self.incumbent
            .insert(SolutionSnapshot::new(self.model_id, values, objective_value))
    }

    /// Asks the search to stop at its next safe point.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Returns true once a stop was requested or a limit was reached.
    pub fn is_terminated(&self) -> bool {
        self.stop_requested || self.termination.is_terminated(self)
    }

    pub fn progress(&self) -> SearchProgress {
        SearchProgress {
            node_count: self.node_count,
            solution_count: self.solution_count,
            elapsed: self.elapsed(),
        }
    }

    pub fn statistics(&self) -> &SolveStatistics {
        &self.statistics
    }

    /// Ends the search, returning the final incumbent and statistics.
    pub fn finish(self) -> (Option<SolutionSnapshot>, SolveStatistics) {
        let mut statistics = self.statistics;
        statistics.total_duration = self.start_time.elapsed();
        statistics.nodes_explored = self.node_count;
        (self.incumbent, statistics)
    }
}

impl Debug for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchScope")
            .field("model_id", &self.model_id)
            .field("node_count", &self.node_count)
            .field("solution_count", &self.solution_count)
            .field("incumbent", &self.incumbent_objective())
            .field("termination", &self.termination)
            .field("stop_requested", &self.stop_requested)
            .finish()
    }
}
