//! Milestone dispatch from inside the search loop.

use std::fmt::{self, Debug};
use std::sync::Arc;

use mipforge_core::{CallbackFailure, MipEvent};
use tracing::{debug, trace, warn};

use super::{CallbackContext, CallbackRegistry, FailureBoundary, InvocationOutcome};
use crate::scope::SearchScope;

/// Failures kept verbatim per solve; later failures are only counted.
pub const MAX_RECORDED_FAILURES: usize = 1024;

/// What the search loop should do after a milestone has been dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Continue,
    /// A callback failed under the stop-search policy.
    Stop,
}

/// Per-solve summary produced by [`EventDispatcher::into_report`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    /// Invocations per event kind, indexed by [`MipEvent::index`].
    pub invocations: [u64; 3],
    /// Recorded failures in invocation order.
    pub failures: Vec<CallbackFailure>,
    /// Total failures, including those beyond the recording cap.
    pub failure_count: u64,
}

impl DispatchReport {
    pub fn invocation_count(&self, event: MipEvent) -> u64 {
        self.invocations[event.index()]
    }

    pub fn total_invocations(&self) -> u64 {
        self.invocations.iter().sum()
    }
}

/// Invokes the attached callback at search milestones.
///
/// One dispatcher is created per solve. It looks the callback up in the
/// registry on every milestone, so a solve started without a callback pays
/// only for that lookup. The registry lock is released before the callback
/// runs; the callback may therefore query the registry, and any attempt to
/// attach from inside it is refused with `InvalidState`.
pub struct EventDispatcher {
    registry: Arc<CallbackRegistry>,
    boundary: FailureBoundary,
    invocations: [u64; 3],
    total_invocations: u64,
    failures: Vec<CallbackFailure>,
    failure_count: u64,
}

impl EventDispatcher {
    pub fn new(registry: Arc<CallbackRegistry>, boundary: FailureBoundary) -> Self {
        Self {
            registry,
            boundary,
            invocations: [0; 3],
            total_invocations: 0,
            failures: Vec::new(),
            failure_count: 0,
        }
    }

    /// Fires `event` against the attached callback, if any.
    ///
    /// Must only be called once the scope's incumbent is committed: for
    /// [`MipEvent::MipSolution`] the context exposes `scope.incumbent()`.
    pub fn dispatch(&mut self, event: MipEvent, scope: &SearchScope) -> DispatchOutcome {
        let Some(callback) = self.registry.current() else {
            return DispatchOutcome::Continue;
        };

        let incumbent = if event.has_incumbent() {
            scope.incumbent()
        } else {
            None
        };
        let context = CallbackContext::new(event, incumbent, scope.progress());

        self.invocations[event.index()] += 1;
        self.total_invocations += 1;
        let invocation = self.total_invocations;
        trace!(
            event = %event,
            invocation,
            node_count = context.node_count(),
            "Dispatching callback"
        );

        match self.boundary.invoke(callback.as_ref(), &context, invocation) {
            InvocationOutcome::Completed => DispatchOutcome::Continue,
            InvocationOutcome::Failed(failure) => self.record_failure(failure),
        }
    }

    fn record_failure(&mut self, failure: CallbackFailure) -> DispatchOutcome {
        self.failure_count += 1;
        if self.failure_count == 1 {
            warn!("Contained {}", failure);
        } else {
            debug!("Contained {}", failure);
        }
        if self.failures.len() < MAX_RECORDED_FAILURES {
            self.failures.push(failure);
        }

        if self.boundary.stops_on_failure() {
            debug!("Callback failure policy requests the search to stop");
            DispatchOutcome::Stop
        } else {
            DispatchOutcome::Continue
        }
    }

    pub fn boundary(&self) -> FailureBoundary {
        self.boundary
    }

    /// Number of invocations for `event` so far.
    pub fn invocation_count(&self, event: MipEvent) -> u64 {
        self.invocations[event.index()]
    }

    pub fn total_invocations(&self) -> u64 {
        self.total_invocations
    }

    pub fn failures(&self) -> &[CallbackFailure] {
        &self.failures
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count
    }

    pub fn into_report(self) -> DispatchReport {
        DispatchReport {
            invocations: self.invocations,
            failures: self.failures,
            failure_count: self.failure_count,
        }
    }
}

impl Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("boundary", &self.boundary)
            .field("invocations", &self.invocations)
            .field("failure_count", &self.failure_count)
            .finish()
    }
}
