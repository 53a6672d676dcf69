//! MipForge Solver Engine
//!
//! This crate provides the search side of MipForge:
//! - [`Solver`] owning a model, a backend and a callback slot
//! - The callback bridge (registry, dispatcher, context, failure boundary)
//! - Search backends, including a pure-integer branch-and-bound
//! - Termination conditions
//! - Per-solve statistics
//!
//! Callbacks observe the search at three milestones (presolve, node,
//! new incumbent) and can read the incumbent only when one is committed.
//! Failures in callback code never abort a solve; they are contained and
//! reported afterwards. A callback that wants the search to end early uses
//! an [`InterruptHandle`].

pub mod backend;
pub mod callback;
pub mod scope;
pub mod settings;
pub mod solver;
pub mod statistics;
pub mod status;
pub mod termination;

#[cfg(test)]
mod test_utils;

pub use backend::{BranchAndBound, SearchBackend, SolverKind};
pub use callback::{
    CallbackContext, CallbackError, CallbackRegistry, CallbackResult, CountingCallback,
    DispatchOutcome, EventDispatcher, FailureBoundary, LoggingCallback, MipCallback,
    SolutionSnapshotAccessor,
};
pub use scope::{SearchProgress, SearchScope};
pub use settings::SolveSettings;
pub use solver::{InterruptHandle, Solver};
pub use statistics::{IncumbentImprovement, SolveStatistics};
pub use status::SolveStatus;
pub use termination::{
    ExternalTermination, NodeCountTermination, OrTermination, SolutionCountTermination,
    Termination, TimeTermination,
};
