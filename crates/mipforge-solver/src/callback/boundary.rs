//! Failure containment around callback invocations.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use mipforge_config::CallbackFailurePolicy;
use mipforge_core::{CallbackFailure, FailureCause};

use super::{CallbackContext, MipCallback};

/// Result of invoking a callback through a [`FailureBoundary`].
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationOutcome {
    /// The callback returned `Ok`.
    Completed,
    /// The callback returned an error or panicked.
    Failed(CallbackFailure),
}

impl InvocationOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, InvocationOutcome::Failed(_))
    }
}

/// Wraps every callback invocation so that no failure crosses back into
/// the search.
///
/// Both failure channels are caught: an `Err` returned by the callback and
/// a panic unwinding out of it. The callback only sees the search through
/// a read-only context, so no search state is left half-updated by an
/// unwind.
///
/// Panics are only contained when the crate is built with `panic = "unwind"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailureBoundary {
    policy: CallbackFailurePolicy,
}

impl FailureBoundary {
    pub fn new(policy: CallbackFailurePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CallbackFailurePolicy {
        self.policy
    }

    /// Returns true if a failure should stop the search.
    pub fn stops_on_failure(&self) -> bool {
        self.policy == CallbackFailurePolicy::StopSearch
    }

    /// Invokes `callback` with `context`, capturing any failure.
    ///
    /// `invocation` is the 1-based index of this invocation within the
    /// solve and is recorded in the failure.
    pub fn invoke(
        &self,
        callback: &dyn MipCallback,
        context: &CallbackContext<'_>,
        invocation: u64,
    ) -> InvocationOutcome {
        let event = context.event();
        match panic::catch_unwind(AssertUnwindSafe(|| callback.on_event(context))) {
            Ok(Ok(())) => InvocationOutcome::Completed,
            Ok(Err(err)) => InvocationOutcome::Failed(CallbackFailure::new(
                event,
                invocation,
                FailureCause::Error(err.to_string()),
            )),
            Err(payload) => InvocationOutcome::Failed(CallbackFailure::new(
                event,
                invocation,
                FailureCause::Panic(panic_message(payload.as_ref())),
            )),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::{CallbackError, CallbackResult, CountingCallback};
    use crate::scope::SearchProgress;
    use mipforge_core::MipEvent;

    #[derive(Debug)]
    struct Erroring;

    impl MipCallback for Erroring {
        fn on_event(&self, _context: &CallbackContext<'_>) -> CallbackResult {
            Err(CallbackError::msg("bad input"))
        }
    }

    #[derive(Debug)]
    struct Panicking;

    impl MipCallback for Panicking {
        fn on_event(&self, _context: &CallbackContext<'_>) -> CallbackResult {
            panic!("callback exploded at node {}", 7)
        }
    }

    fn node_context() -> CallbackContext<'static> {
        CallbackContext::new(MipEvent::MipNode, None, SearchProgress::default())
    }

    #[test]
    fn test_completed_invocation() {
        let boundary = FailureBoundary::default();
        let callback = CountingCallback::new();

        let outcome = boundary.invoke(&callback, &node_context(), 1);

        assert_eq!(outcome, InvocationOutcome::Completed);
        assert_eq!(callback.count(MipEvent::MipNode), 1);
    }

    #[test]
    fn test_error_is_captured() {
        let boundary = FailureBoundary::default();

        let outcome = boundary.invoke(&Erroring, &node_context(), 4);

        match outcome {
            InvocationOutcome::Failed(failure) => {
                assert_eq!(failure.event, MipEvent::MipNode);
                assert_eq!(failure.invocation, 4);
                assert_eq!(failure.cause, FailureCause::Error("bad input".to_string()));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_panic_is_captured() {
        let boundary = FailureBoundary::default();

        let outcome = boundary.invoke(&Panicking, &node_context(), 2);

        match outcome {
            InvocationOutcome::Failed(failure) => {
                assert!(failure.is_panic());
                assert_eq!(
                    failure.cause,
                    FailureCause::Panic("callback exploded at node 7".to_string())
                );
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_policy() {
        assert!(!FailureBoundary::default().stops_on_failure());
        assert!(FailureBoundary::new(CallbackFailurePolicy::StopSearch).stops_on_failure());
    }
}
