//! Solve statistics collection and reporting.
//!
//! Tracks search effort (nodes explored and pruned, presolve tightenings),
//! the incumbent history and the callback bridge activity of one solve.

use std::time::Duration;

use mipforge_core::MipEvent;

/// Record of a new incumbent.
#[derive(Debug, Clone, PartialEq)]
pub struct IncumbentImprovement {
    /// Time since solving started when the incumbent was committed.
    pub time_offset: Duration,
    /// Nodes explored when the incumbent was committed.
    pub node_count: u64,
    /// Objective value of the incumbent.
    pub objective_value: f64,
}

/// Complete statistics for one solve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveStatistics {
    /// Total time spent solving.
    pub total_duration: Duration,
    /// Branch-and-bound nodes explored.
    pub nodes_explored: u64,
    /// Nodes discarded by propagation or bounding.
    pub nodes_pruned: u64,
    /// Variable bounds tightened during presolve.
    pub presolve_tightenings: u64,
    /// Every committed incumbent, in order.
    pub incumbent_history: Vec<IncumbentImprovement>,
    /// Callback invocations per event kind, indexed by [`MipEvent::index`].
    pub callback_invocations: [u64; 3],
    /// Failed callback invocations, contained by the failure boundary.
    pub callback_failures: u64,
}

impl SolveStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_pruned(&mut self) {
        self.nodes_pruned += 1;
    }

    pub(crate) fn record_improvement(
        &mut self,
        time_offset: Duration,
        node_count: u64,
        objective_value: f64,
    ) {
        self.incumbent_history.push(IncumbentImprovement {
            time_offset,
            node_count,
            objective_value,
        });
    }

    /// Returns the number of incumbents committed.
    pub fn improvement_count(&self) -> usize {
        self.incumbent_history.len()
    }

    /// Returns the objective value of the last incumbent, if any.
    pub fn best_objective(&self) -> Option<f64> {
        self.incumbent_history.last().map(|i| i.objective_value)
    }

    pub fn callback_invocation_count(&self, event: MipEvent) -> u64 {
        self.callback_invocations[event.index()]
    }

    pub fn total_callback_invocations(&self) -> u64 {
        self.callback_invocations.iter().sum()
    }

    /// Returns the node throughput, zero for an instantaneous solve.
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.total_duration.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.nodes_explored as f64 / secs
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_statistics_are_empty() {
        let stats = SolveStatistics::new();
        assert_eq!(stats.nodes_explored, 0);
        assert_eq!(stats.improvement_count(), 0);
        assert!(stats.best_objective().is_none());
        assert_eq!(stats.total_callback_invocations(), 0);
    }

    #[test]
    fn test_record_improvement() {
        let mut stats = SolveStatistics::new();
        stats.record_improvement(Duration::from_millis(1), 3, 10.0);
        stats.record_improvement(Duration::from_millis(5), 17, 12.5);

        assert_eq!(stats.improvement_count(), 2);
        assert_eq!(stats.best_objective(), Some(12.5));
        assert_eq!(stats.incumbent_history[1].node_count, 17);
    }

    #[test]
    fn test_callback_counts() {
        let stats = SolveStatistics {
            callback_invocations: [1, 40, 3],
            ..SolveStatistics::default()
        };
        assert_eq!(stats.callback_invocation_count(MipEvent::MipNode), 40);
        assert_eq!(stats.total_callback_invocations(), 44);
    }

    #[test]
    fn test_nodes_per_second() {
        let mut stats = SolveStatistics::new();
        assert_eq!(stats.nodes_per_second(), 0.0);

        stats.nodes_explored = 500;
        stats.total_duration = Duration::from_secs(2);
        assert!((stats.nodes_per_second() - 250.0).abs() < f64::EPSILON);
    }
}
