//! Test utilities for mipforge-solver
//!
//! Provides common fixtures used across the crate's test modules.
//! Re-exports models from mipforge-test and adds solver-specific helpers.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use mipforge_core::{MipError, MipEvent, Model};

use crate::backend::SearchBackend;
use crate::callback::{
    CallbackContext, CallbackError, CallbackRegistry, CallbackResult, EventDispatcher,
    FailureBoundary, MipCallback,
};
use crate::scope::SearchScope;
use crate::settings::SolveSettings;
use crate::status::SolveStatus;

pub use mipforge_test::{
    infeasible_model, random_integer_program, small_knapsack, unconstrained_model,
};

/// Routes solver logs through the test harness's capture, filtered by
/// `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Scopes and dispatchers
// ============================================================================

/// Two integer variables in `[0, 5]`, no constraints.
pub fn two_variable_model() -> Model {
    let mut model = Model::new("two");
    model.make_int_var(0.0, 5.0, "x");
    model.make_int_var(0.0, 5.0, "y");
    model
}

/// Creates a scope over [`two_variable_model`] that never terminates on
/// its own.
pub fn create_test_scope() -> SearchScope {
    create_scope(&two_variable_model(), SolveSettings::default())
}

/// Creates a scope for `model` with the limits of `settings`.
pub fn create_scope(model: &Model, settings: SolveSettings) -> SearchScope {
    let termination = settings.termination(Arc::new(AtomicBool::new(false)));
    SearchScope::new(model.id(), settings, termination)
}

/// Creates a dispatcher whose registry holds `callback`.
pub fn create_dispatcher(
    callback: Option<Arc<dyn MipCallback>>,
    boundary: FailureBoundary,
) -> (Arc<CallbackRegistry>, EventDispatcher) {
    let registry = Arc::new(CallbackRegistry::new());
    if let Some(callback) = callback {
        registry.attach(callback).unwrap();
    }
    let dispatcher = EventDispatcher::new(registry.clone(), boundary);
    (registry, dispatcher)
}

// ============================================================================
// Callbacks
// ============================================================================

/// What a [`RecordingCallback`] saw in one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub event: MipEvent,
    pub can_query: bool,
    pub values: Option<Vec<f64>>,
    pub objective: Option<f64>,
    pub node_count: u64,
    pub solution_count: u64,
}

/// Records every invocation, copying the incumbent when it is queryable.
#[derive(Debug, Default)]
pub struct RecordingCallback {
    observations: Mutex<Vec<Observation>>,
}

impl RecordingCallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observations(&self) -> Vec<Observation> {
        self.observations.lock().unwrap().clone()
    }

    pub fn of(&self, event: MipEvent) -> Vec<Observation> {
        self.observations()
            .into_iter()
            .filter(|o| o.event == event)
            .collect()
    }

    pub fn last_solution(&self) -> Option<Vec<f64>> {
        self.of(MipEvent::MipSolution)
            .last()
            .and_then(|o| o.values.clone())
    }
}

impl MipCallback for RecordingCallback {
    fn on_event(&self, context: &CallbackContext<'_>) -> CallbackResult {
        let observation = Observation {
            event: context.event(),
            can_query: context.can_query_variable_values(),
            values: context.variable_values().ok().map(<[f64]>::to_vec),
            objective: context.objective_value().ok(),
            node_count: context.node_count(),
            solution_count: context.solution_count(),
        };
        self.observations.lock().unwrap().push(observation);
        Ok(())
    }
}

/// How a [`FailingCallback`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    Error,
    Panic,
}

/// Fails on every invocation, counting how often it was called.
#[derive(Debug)]
pub struct FailingCallback {
    mode: FailureMode,
    invocations: AtomicU64,
}

impl FailingCallback {
    pub fn new(mode: FailureMode) -> Self {
        Self {
            mode,
            invocations: AtomicU64::new(0),
        }
    }

    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl MipCallback for FailingCallback {
    fn on_event(&self, context: &CallbackContext<'_>) -> CallbackResult {
        let n = self.invocations.fetch_add(1, Ordering::SeqCst) + 1;
        match self.mode {
            FailureMode::Error => Err(CallbackError::msg(format!(
                "failure #{} during {}",
                n,
                context.event()
            ))),
            FailureMode::Panic => panic!("panic #{} during {}", n, context.event()),
        }
    }
}

// ============================================================================
// ScriptedBackend
// ============================================================================

/// One step of a [`ScriptedBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Presolve,
    Node,
    /// Commits the values as the new incumbent, then fires `MipSolution`.
    Solution(Vec<f64>),
}

/// A backend that replays a fixed sequence of milestones.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    steps: Vec<ScriptStep>,
}

impl ScriptedBackend {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self { steps }
    }
}

impl SearchBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "SCRIPTED"
    }

    fn validate(&self, _model: &Model) -> Result<(), MipError> {
        Ok(())
    }

    fn solve(
        &mut self,
        model: &Model,
        scope: &mut SearchScope,
        dispatcher: &mut EventDispatcher,
    ) -> SolveStatus {
        for step in &self.steps {
            if scope.is_terminated() {
                break;
            }
            let outcome = match step {
                ScriptStep::Presolve => dispatcher.dispatch(MipEvent::Presolve, scope),
                ScriptStep::Node => {
                    scope.increment_node_count();
                    dispatcher.dispatch(MipEvent::MipNode, scope)
                }
                ScriptStep::Solution(values) => {
                    let objective = model.objective_value(values);
                    scope.commit_incumbent(values.clone(), objective);
                    dispatcher.dispatch(MipEvent::MipSolution, scope)
                }
            };
            if outcome == crate::callback::DispatchOutcome::Stop {
                scope.request_stop();
            }
        }
        if scope.incumbent().is_some() {
            SolveStatus::Feasible
        } else {
            SolveStatus::NotSolved
        }
    }
}
