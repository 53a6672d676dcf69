//! MipForge - a MIP solver with a search-time callback bridge
//!
//! Build a model through a [`Solver`], attach a [`MipCallback`], and the
//! search reports its milestones to the callback as it runs.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mipforge::prelude::*;
//!
//! let mut solver = Solver::create_solver("BNB").unwrap();
//! let x = solver.make_int_var(0.0, 4.0, "x");
//! solver.objective_mut().set_coefficient(x, 1.0).unwrap();
//! solver.objective_mut().set_maximization();
//!
//! let callback = Arc::new(CountingCallback::new());
//! solver.set_callback(callback.clone()).unwrap();
//!
//! assert_eq!(solver.solve(), SolveStatus::Optimal);
//! assert_eq!(solver.solution_value(x), Some(4.0));
//! assert_eq!(
//!     callback.count(MipEvent::MipNode),
//!     solver.statistics().unwrap().nodes_explored
//! );
//! ```

pub mod logging;

pub use mipforge_config::{
    CallbackConfig, CallbackFailurePolicy, ConfigError, SolverConfig, TerminationConfig,
};
pub use mipforge_core::{
    CallbackFailure, Constraint, FailureCause, MipError, MipEvent, Model, Objective,
    ObjectiveSense, SolutionSnapshot, Variable,
};
pub use mipforge_solver::{
    callback, CallbackContext, CallbackError, CallbackResult, CountingCallback, InterruptHandle,
    LoggingCallback, MipCallback, SearchBackend, SolveStatistics, SolveStatus, Solver, SolverKind,
};

pub mod prelude {
    pub use super::{
        CallbackContext, CallbackError, CallbackFailurePolicy, CallbackResult, CountingCallback,
        InterruptHandle, LoggingCallback, MipCallback, MipError, MipEvent, SolveStatus, Solver,
        SolverConfig, Variable,
    };
}
