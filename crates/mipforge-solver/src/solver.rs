//! Solver implementation.

use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mipforge_config::SolverConfig;
use mipforge_core::{
    CallbackFailure, Constraint, MipError, Model, Objective, SolutionSnapshot, Variable,
};
use tracing::{info, warn};

use crate::backend::{SearchBackend, SolverKind};
use crate::callback::{CallbackRegistry, EventDispatcher, FailureBoundary, MipCallback};
use crate::scope::SearchScope;
use crate::settings::SolveSettings;
use crate::statistics::SolveStatistics;
use crate::status::SolveStatus;

/// Outcome of the last solve.
#[derive(Debug, Clone)]
struct SolveResult {
    status: SolveStatus,
    solution: Option<SolutionSnapshot>,
    statistics: SolveStatistics,
    failures: Vec<CallbackFailure>,
    failure_count: u64,
    deferred_error: Option<CallbackFailure>,
}

impl SolveResult {
    fn without_search(status: SolveStatus) -> Self {
        Self {
            status,
            solution: None,
            statistics: SolveStatistics::new(),
            failures: Vec::new(),
            failure_count: 0,
            deferred_error: None,
        }
    }
}

/// A MIP solver owning one [`Model`], one search backend and one callback
/// slot.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use mipforge_core::MipEvent;
/// use mipforge_solver::callback::CountingCallback;
/// use mipforge_solver::{SolveStatus, Solver};
///
/// let mut solver = Solver::create_solver("BNB_INTEGER_PROGRAMMING").unwrap();
/// let x = solver.make_int_var(0.0, 10.0, "x");
/// let y = solver.make_int_var(0.0, 10.0, "y");
/// let c = solver.make_constraint(f64::NEG_INFINITY, 14.0);
/// solver.set_constraint_coefficient(c, x, 2.0).unwrap();
/// solver.set_constraint_coefficient(c, y, 1.0).unwrap();
/// solver.objective_mut().set_coefficient(x, 3.0).unwrap();
/// solver.objective_mut().set_coefficient(y, 1.0).unwrap();
/// solver.objective_mut().set_maximization();
///
/// let callback = Arc::new(CountingCallback::new());
/// solver.set_callback(callback.clone()).unwrap();
///
/// assert_eq!(solver.solve(), SolveStatus::Optimal);
/// assert_eq!(solver.objective_value(), Some(21.0));
/// assert!(callback.count(MipEvent::MipSolution) >= 1);
/// ```
pub struct Solver {
    model: Model,
    backend: Box<dyn SearchBackend>,
    registry: Arc<CallbackRegistry>,
    config: SolverConfig,
    parameters: String,
    interrupt: Arc<AtomicBool>,
    result: Option<SolveResult>,
}

impl Solver {
    /// Creates a solver of the given kind.
    ///
    /// Returns `None` if the kind is unknown or its backend is not
    /// available in this build; callers treat this as "skip".
    pub fn create_solver(kind: &str) -> Option<Self> {
        let kind = match kind.parse::<SolverKind>() {
            Ok(kind) => kind,
            Err(err) => {
                warn!("{}", err);
                return None;
            }
        };
        let Some(backend) = kind.create_backend() else {
            info!("Solver kind {} is not available in this build", kind);
            return None;
        };
        Some(Self::with_backend(kind.name(), backend))
    }

    /// Creates a solver around a custom backend.
    pub fn with_backend(name: impl Into<String>, backend: Box<dyn SearchBackend>) -> Self {
        Self {
            model: Model::new(name),
            backend,
            registry: Arc::new(CallbackRegistry::new()),
            config: SolverConfig::default(),
            parameters: String::new(),
            interrupt: Arc::new(AtomicBool::new(false)),
            result: None,
        }
    }

    /// Sets configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Name of the search backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    // === Model building ===

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn make_int_var(&mut self, lower_bound: f64, upper_bound: f64, name: &str) -> Variable {
        self.model.make_int_var(lower_bound, upper_bound, name)
    }

    pub fn make_num_var(&mut self, lower_bound: f64, upper_bound: f64, name: &str) -> Variable {
        self.model.make_num_var(lower_bound, upper_bound, name)
    }

    pub fn make_bool_var(&mut self, name: &str) -> Variable {
        self.model.make_bool_var(name)
    }

    pub fn make_constraint(&mut self, lower_bound: f64, upper_bound: f64) -> Constraint {
        self.model.make_constraint(lower_bound, upper_bound)
    }

    pub fn make_named_constraint(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        name: &str,
    ) -> Constraint {
        self.model
            .make_named_constraint(lower_bound, upper_bound, name)
    }

    pub fn set_constraint_coefficient(
        &mut self,
        constraint: Constraint,
        variable: Variable,
        coefficient: f64,
    ) -> Result<(), MipError> {
        self.model
            .set_constraint_coefficient(constraint, variable, coefficient)
    }

    pub fn objective(&self) -> &Objective {
        self.model.objective()
    }

    pub fn objective_mut(&mut self) -> &mut Objective {
        self.model.objective_mut()
    }

    pub fn num_variables(&self) -> usize {
        self.model.num_variables()
    }

    pub fn num_constraints(&self) -> usize {
        self.model.num_constraints()
    }

    pub fn variable(&self, index: usize) -> Option<Variable> {
        self.model.variable(index)
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.model.variables()
    }

    // === Callback ===

    /// Attaches `callback`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`MipError::InvalidState`] while a solve is in progress.
    pub fn set_callback(&self, callback: Arc<dyn MipCallback>) -> Result<(), MipError> {
        self.registry.attach(callback)
    }

    /// Detaches the callback, returning it.
    pub fn clear_callback(&self) -> Option<Arc<dyn MipCallback>> {
        self.registry.detach()
    }

    /// Returns the registry shared with the search.
    pub fn callback_registry(&self) -> Arc<CallbackRegistry> {
        Arc::clone(&self.registry)
    }

    // === Parameters and output ===

    /// Stores a backend-specific parameter string, applied at the next solve.
    pub fn set_solver_specific_parameters_as_string(&mut self, parameters: impl Into<String>) {
        self.parameters = parameters.into();
    }

    pub fn solver_specific_parameters(&self) -> &str {
        &self.parameters
    }

    /// Logs search progress at INFO level.
    pub fn enable_output(&mut self) {
        self.config.log_output = true;
    }

    pub fn suppress_output(&mut self) {
        self.config.log_output = false;
    }

    /// Replaces any configured time limit.
    pub fn set_time_limit(&mut self, limit: Duration) {
        let termination = self.config.termination.get_or_insert_with(Default::default);
        termination.seconds_spent_limit = None;
        let millis = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
        termination.millis_spent_limit = Some(millis);
    }

    /// Returns a handle that can stop a running solve from any thread.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        InterruptHandle {
            flag: Arc::clone(&self.interrupt),
            registry: Arc::clone(&self.registry),
        }
    }

    pub fn is_solving(&self) -> bool {
        self.registry.is_solving()
    }

    // === Solve ===

    /// Runs the search.
    ///
    /// Never fails because of the callback: callback failures are contained
    /// and available afterwards through [`callback_failures`](Self::callback_failures).
    pub fn solve(&mut self) -> SolveStatus {
        self.result = None;
        self.interrupt.store(false, Ordering::SeqCst);

        let registry = Arc::clone(&self.registry);
        let _guard = match registry.begin_solve() {
            Ok(guard) => guard,
            Err(err) => {
                warn!("{}", err);
                return SolveStatus::NotSolved;
            }
        };

        if let Err(err) = self.config.validate() {
            warn!("Rejected solver configuration: {}", err);
            return self.finish_without_search(SolveStatus::InvalidParameters);
        }
        let mut settings = SolveSettings::from_config(&self.config);
        if let Err(err) = self.backend.apply_parameters(&self.parameters, &mut settings) {
            warn!("Rejected solver-specific parameters: {}", err);
            return self.finish_without_search(SolveStatus::InvalidParameters);
        }
        if let Err(err) = self.backend.validate(&self.model) {
            warn!("{}", err);
            return self.finish_without_search(SolveStatus::ModelInvalid);
        }

        info!(
            event = "solve_start",
            backend = self.backend.name(),
            variables = self.model.num_variables(),
            constraints = self.model.num_constraints(),
            callback = registry.is_attached(),
        );

        let termination = settings.termination(Arc::clone(&self.interrupt));
        let boundary = FailureBoundary::new(self.config.callback.failure_policy);
        let mut scope = SearchScope::new(self.model.id(), settings, termination);
        let mut dispatcher = EventDispatcher::new(Arc::clone(&registry), boundary);

        let status = self.backend.solve(&self.model, &mut scope, &mut dispatcher);

        let report = dispatcher.into_report();
        let (solution, mut statistics) = scope.finish();
        statistics.callback_invocations = report.invocations;
        statistics.callback_failures = report.failure_count;

        info!(
            event = "solve_end",
            status = %status,
            objective = ?solution.as_ref().map(SolutionSnapshot::objective_value),
            nodes = statistics.nodes_explored,
            solutions = statistics.improvement_count(),
            duration_ms = u64::try_from(statistics.total_duration.as_millis()).unwrap_or(u64::MAX),
            callback_failures = report.failure_count,
        );

        self.result = Some(SolveResult {
            status,
            solution,
            statistics,
            deferred_error: report.failures.first().cloned(),
            failures: report.failures,
            failure_count: report.failure_count,
        });
        status
    }

    fn finish_without_search(&mut self, status: SolveStatus) -> SolveStatus {
        self.result = Some(SolveResult::without_search(status));
        status
    }

    // === Results ===

    /// Status of the last solve, `None` before the first.
    pub fn status(&self) -> Option<SolveStatus> {
        self.result.as_ref().map(|r| r.status)
    }

    /// Final incumbent of the last solve.
    pub fn solution(&self) -> Option<&SolutionSnapshot> {
        self.result.as_ref().and_then(|r| r.solution.as_ref())
    }

    /// Value of `variable` in the final solution.
    ///
    /// `None` without a solution, or for a variable the solved model did
    /// not contain.
    pub fn solution_value(&self, variable: Variable) -> Option<f64> {
        self.solution().and_then(|s| s.value(variable).ok())
    }

    pub fn objective_value(&self) -> Option<f64> {
        self.solution().map(SolutionSnapshot::objective_value)
    }

    pub fn statistics(&self) -> Option<&SolveStatistics> {
        self.result.as_ref().map(|r| &r.statistics)
    }

    /// Callback failures recorded during the last solve.
    pub fn callback_failures(&self) -> &[CallbackFailure] {
        match &self.result {
            Some(result) => &result.failures,
            None => &[],
        }
    }

    /// Total callback failures of the last solve, beyond the recording cap.
    pub fn callback_failure_count(&self) -> u64 {
        self.result.as_ref().map_or(0, |r| r.failure_count)
    }

    pub fn callback_failed(&self) -> bool {
        self.callback_failure_count() > 0
    }

    /// Takes the first callback failure of the last solve as an error.
    ///
    /// Returns `Some` at most once per solve.
    pub fn take_callback_error(&mut self) -> Option<MipError> {
        self.result
            .as_mut()
            .and_then(|r| r.deferred_error.take())
            .map(MipError::from)
    }
}

impl Debug for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("backend", &self.backend)
            .field("model", &self.model.name())
            .field("registry", &self.registry)
            .field("status", &self.status())
            .finish()
    }
}

/// Thread-safe handle requesting early termination of a solve.
#[derive(Debug, Clone)]
pub struct InterruptHandle {
    flag: Arc<AtomicBool>,
    registry: Arc<CallbackRegistry>,
}

impl InterruptHandle {
    /// Requests the running solve to stop at its next node.
    ///
    /// Returns false, and has no effect, if no solve is running.
    pub fn interrupt(&self) -> bool {
        if self.registry.is_solving() {
            self.flag.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    pub fn is_solving(&self) -> bool {
        self.registry.is_solving()
    }
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;
