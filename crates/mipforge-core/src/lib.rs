//! MipForge Core - model, event and error types for mixed-integer programming
//!
//! This crate provides the fundamental abstractions shared by every MipForge crate:
//! - Model types: variables, constraints and the objective
//! - The closed set of search events a callback can observe
//! - Solution snapshots exposed to callbacks and reported after solving
//! - The error taxonomy of the callback bridge

pub mod error;
pub mod event;
pub mod model;
pub mod solution;

pub use error::{CallbackFailure, FailureCause, MipError, Result};
pub use event::MipEvent;
pub use model::{
    Constraint, ConstraintData, Model, ModelId, Objective, ObjectiveSense, Variable, VariableData,
};
pub use solution::SolutionSnapshot;
