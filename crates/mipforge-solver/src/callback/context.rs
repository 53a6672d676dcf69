//! Per-invocation callback context.

use std::time::Duration;

use mipforge_core::{MipError, MipEvent, SolutionSnapshot, Variable};

use super::SolutionSnapshotAccessor;
use crate::scope::SearchProgress;

/// Immutable view handed to a callback for one invocation.
///
/// The context borrows the search's incumbent for the duration of the call
/// only; the lifetime `'a` makes it impossible to keep the context (or any
/// value slice obtained from it) past the invocation.
///
/// Variable values can be queried only during [`MipEvent::MipSolution`],
/// where a committed incumbent always exists. For every other event
/// [`can_query_variable_values`](Self::can_query_variable_values) is false
/// and value queries fail with [`MipError::Capability`].
#[derive(Debug, Clone, Copy)]
pub struct CallbackContext<'a> {
    event: MipEvent,
    snapshot: Option<SolutionSnapshotAccessor<'a>>,
    progress: SearchProgress,
}

impl<'a> CallbackContext<'a> {
    /// Creates a context for `event`.
    ///
    /// The snapshot is exposed only when the event carries an incumbent;
    /// it is dropped for every other event kind.
    pub fn new(
        event: MipEvent,
        incumbent: Option<&'a SolutionSnapshot>,
        progress: SearchProgress,
    ) -> Self {
        let snapshot = if event.has_incumbent() {
            incumbent.map(SolutionSnapshotAccessor::new)
        } else {
            None
        };
        Self {
            event,
            snapshot,
            progress,
        }
    }

    /// Returns the event being dispatched.
    #[inline]
    pub fn event(&self) -> MipEvent {
        self.event
    }

    /// Returns true if variable values can be queried in this invocation.
    #[inline]
    pub fn can_query_variable_values(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Returns the incumbent value of `variable`.
    ///
    /// # Errors
    ///
    /// - [`MipError::Capability`] if the event has no incumbent
    /// - [`MipError::UnknownVariable`] if `variable` belongs to another model
    pub fn variable_value(&self, variable: Variable) -> Result<f64, MipError> {
        self.accessor()?.value(variable)
    }

    /// Returns the incumbent values of all variables in declaration order.
    pub fn variable_values(&self) -> Result<&'a [f64], MipError> {
        Ok(self.accessor()?.values())
    }

    /// Returns the objective value of the incumbent.
    pub fn objective_value(&self) -> Result<f64, MipError> {
        Ok(self.accessor()?.objective_value())
    }

    /// Number of branch-and-bound nodes explored so far.
    pub fn node_count(&self) -> u64 {
        self.progress.node_count
    }

    /// Number of incumbents found so far, including the current one.
    pub fn solution_count(&self) -> u64 {
        self.progress.solution_count
    }

    /// Time since the solve started.
    pub fn elapsed(&self) -> Duration {
        self.progress.elapsed
    }

    fn accessor(&self) -> Result<SolutionSnapshotAccessor<'a>, MipError> {
        self.snapshot
            .ok_or(MipError::Capability { event: self.event })
    }
}
