//! Node count termination.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once the given number of nodes has been explored.
///
/// # Example
///
/// ```
/// use mipforge_solver::termination::NodeCountTermination;
///
/// let term = NodeCountTermination::new(100_000);
/// ```
#[derive(Debug, Clone)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for NodeCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.node_count() >= self.limit
    }
}
