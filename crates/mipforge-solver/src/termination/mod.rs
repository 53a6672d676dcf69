//! Termination conditions for a search.

mod composite;
mod external;
mod node_count;
mod solution_count;
mod time;

use std::fmt::Debug;

use crate::scope::SearchScope;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use node_count::NodeCountTermination;
pub use solution_count::SolutionCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop searching.
pub trait Termination: Send + Debug {
    /// Returns true if the search should terminate.
    fn is_terminated(&self, scope: &SearchScope) -> bool;
}

/// An absent limit never terminates.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(scope))
    }
}

impl<T: Termination + ?Sized> Termination for Box<T> {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        (**self).is_terminated(scope)
    }
}

#[cfg(test)]
mod tests;
