//! Effective settings of one solve.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use mipforge_config::SolverConfig;

use crate::termination::{
    ExternalTermination, NodeCountTermination, OrTermination, SolutionCountTermination,
    Termination, TimeTermination,
};

/// Settings resolved from the [`SolverConfig`], then overridden by the
/// solver-specific parameter string.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveSettings {
    pub presolve: bool,
    pub log_output: bool,
    pub time_limit: Option<Duration>,
    pub node_limit: Option<u64>,
    pub solution_limit: Option<u64>,
}

impl Default for SolveSettings {
    fn default() -> Self {
        Self::from_config(&SolverConfig::default())
    }
}

impl SolveSettings {
    pub fn from_config(config: &SolverConfig) -> Self {
        Self {
            presolve: config.presolve,
            log_output: config.log_output,
            time_limit: config.time_limit(),
            node_limit: config.node_limit(),
            solution_limit: config.solution_limit(),
        }
    }

    /// Builds the termination condition for these limits.
    ///
    /// `interrupt` is always part of the condition so that an
    /// [`InterruptHandle`](crate::InterruptHandle) can stop any solve.
    pub fn termination(&self, interrupt: Arc<AtomicBool>) -> Box<dyn Termination> {
        Box::new(OrTermination((
            self.time_limit.map(TimeTermination::new),
            self.node_limit.map(NodeCountTermination::new),
            self.solution_limit.map(SolutionCountTermination::new),
            ExternalTermination::new(interrupt),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = SolverConfig::new()
            .with_termination_millis(1500)
            .with_node_limit(42)
            .with_presolve(false);

        let settings = SolveSettings::from_config(&config);
        assert!(!settings.presolve);
        assert!(!settings.log_output);
        assert_eq!(settings.time_limit, Some(Duration::from_millis(1500)));
        assert_eq!(settings.node_limit, Some(42));
        assert_eq!(settings.solution_limit, None);
    }

    #[test]
    fn test_default_matches_default_config() {
        let settings = SolveSettings::default();
        assert!(settings.presolve);
        assert_eq!(settings.time_limit, None);
    }
}
