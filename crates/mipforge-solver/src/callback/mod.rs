//! Search-time callback bridge.
//!
//! The bridge lets external code observe a running branch-and-bound search
//! and read the current incumbent without being able to corrupt it.
//!
//! # Components
//!
//! - [`CallbackRegistry`]: single-slot attachment point owned by a solver
//! - [`EventDispatcher`]: fires milestones from inside the search loop
//! - [`CallbackContext`]: per-invocation view handed to the callback
//! - [`SolutionSnapshotAccessor`]: read-only window onto the incumbent
//! - [`FailureBoundary`]: contains errors and panics raised by callback code
//!
//! # Usage
//!
//! ```
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::{Arc, Mutex};
//! use mipforge_core::{MipEvent, Variable};
//! use mipforge_solver::callback::{CallbackContext, CallbackResult, MipCallback};
//!
//! #[derive(Debug, Default)]
//! struct LastIncumbent {
//!     solutions: AtomicU64,
//!     values: Mutex<Vec<f64>>,
//! }
//!
//! impl MipCallback for LastIncumbent {
//!     fn on_event(&self, ctx: &CallbackContext<'_>) -> CallbackResult {
//!         if ctx.event() != MipEvent::MipSolution {
//!             return Ok(());
//!         }
//!         self.solutions.fetch_add(1, Ordering::SeqCst);
//!         let values = ctx.variable_values()?;
//!         *self.values.lock().unwrap() = values.to_vec();
//!         Ok(())
//!     }
//! }
//!
//! let callback = Arc::new(LastIncumbent::default());
//! assert_eq!(callback.solutions.load(Ordering::SeqCst), 0);
//! ```

mod boundary;
mod context;
mod dispatcher;
mod registry;
mod snapshot;

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use mipforge_core::{MipError, MipEvent};
use thiserror::Error;

pub use boundary::{FailureBoundary, InvocationOutcome};
pub use context::CallbackContext;
pub use dispatcher::{DispatchOutcome, DispatchReport, EventDispatcher, MAX_RECORDED_FAILURES};
pub use registry::CallbackRegistry;
pub use snapshot::SolutionSnapshotAccessor;

/// Error a callback returns to signal failure.
///
/// Returning an error is one of the two ways callback code can fail; the
/// other is panicking. Both are contained by the [`FailureBoundary`].
#[derive(Debug, Error)]
pub enum CallbackError {
    /// A query on the [`CallbackContext`] failed.
    #[error(transparent)]
    Query(#[from] MipError),

    /// A failure described by a message.
    #[error("{0}")]
    Message(String),

    /// Any other error raised by callback code.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CallbackError {
    pub fn msg(message: impl Into<String>) -> Self {
        CallbackError::Message(message.into())
    }
}

/// Result type returned by [`MipCallback::on_event`].
pub type CallbackResult = Result<(), CallbackError>;

/// Caller-supplied code invoked at search milestones.
///
/// The callback is invoked synchronously on the search thread; the search
/// makes no progress while `on_event` runs. The `Ok` value carries no data:
/// callbacks report back through their own state, which is why the method
/// takes `&self` and implementations use interior mutability.
pub trait MipCallback: Send + Sync + Debug {
    /// Called once per milestone with a context valid only for this call.
    fn on_event(&self, context: &CallbackContext<'_>) -> CallbackResult;
}

/// A callback that counts invocations per event kind.
///
/// Useful for testing and statistics collection.
#[derive(Debug, Default)]
pub struct CountingCallback {
    counts: [AtomicU64; 3],
}

impl CountingCallback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of invocations for `event`.
    pub fn count(&self, event: MipEvent) -> u64 {
        self.counts[event.index()].load(Ordering::SeqCst)
    }

    /// Returns the number of invocations across all events.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        for counter in &self.counts {
            counter.store(0, Ordering::SeqCst);
        }
    }
}

impl MipCallback for CountingCallback {
    fn on_event(&self, context: &CallbackContext<'_>) -> CallbackResult {
        self.counts[context.event().index()].fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A callback that logs new incumbents through `tracing`.
///
/// Node and presolve events are logged at TRACE level.
#[derive(Debug, Clone, Default)]
pub struct LoggingCallback {
    prefix: String,
}

impl LoggingCallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl MipCallback for LoggingCallback {
    fn on_event(&self, context: &CallbackContext<'_>) -> CallbackResult {
        match context.event() {
            MipEvent::MipSolution => {
                let objective = context.objective_value()?;
                tracing::info!(
                    "{}[Callback] Incumbent #{} with objective {} at node {}",
                    self.prefix,
                    context.solution_count(),
                    objective,
                    context.node_count()
                );
            }
            event => {
                tracing::trace!(
                    "{}[Callback] {} at node {}",
                    self.prefix,
                    event,
                    context.node_count()
                );
            }
        }
        Ok(())
    }
}
