//! Incumbent count termination.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once the given number of incumbents has been committed.
#[derive(Debug, Clone)]
pub struct SolutionCountTermination {
    limit: u64,
}

impl SolutionCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for SolutionCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.solution_count() >= self.limit
    }
}
