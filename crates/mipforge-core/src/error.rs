//! Error types for MipForge

use std::fmt;

use thiserror::Error;

use crate::event::MipEvent;

/// Main error type for MipForge operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MipError {
    /// The callback registry was mutated while a solve was in progress
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Variable values were queried during an event that has no incumbent
    #[error("Variable values cannot be queried during a {event} event")]
    Capability { event: MipEvent },

    /// The variable does not belong to the model being solved
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    /// Callback code failed; contained by the failure boundary
    #[error("Callback failure: {0}")]
    CallbackFailure(CallbackFailure),

    /// The model cannot be handled by the selected backend
    #[error("Model invalid: {0}")]
    ModelInvalid(String),

    /// Error in solver configuration or backend parameters
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for MipForge operations
pub type Result<T> = std::result::Result<T, MipError>;

/// How callback code signalled its failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// The callback returned an error.
    Error(String),
    /// The callback panicked; holds the panic payload message.
    Panic(String),
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Error(msg) => write!(f, "returned error: {}", msg),
            FailureCause::Panic(msg) => write!(f, "panicked: {}", msg),
        }
    }
}

/// Record of one failed callback invocation.
///
/// Produced by the failure boundary and surfaced to the caller of
/// `solve()` once the solve has completed.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackFailure {
    /// Event being dispatched when the callback failed.
    pub event: MipEvent,
    /// 1-based index of the invocation within its solve.
    pub invocation: u64,
    /// The failure itself.
    pub cause: FailureCause,
}

impl CallbackFailure {
    pub fn new(event: MipEvent, invocation: u64, cause: FailureCause) -> Self {
        Self {
            event,
            invocation,
            cause,
        }
    }

    /// Returns true if the callback panicked rather than returning an error.
    pub fn is_panic(&self) -> bool {
        matches!(self.cause, FailureCause::Panic(_))
    }
}

impl fmt::Display for CallbackFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "callback invocation #{} ({}) {}",
            self.invocation, self.event, self.cause
        )
    }
}

impl From<CallbackFailure> for MipError {
    fn from(failure: CallbackFailure) -> Self {
        MipError::CallbackFailure(failure)
    }
}
