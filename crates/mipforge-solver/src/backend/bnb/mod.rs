//! Depth-first integer branch-and-bound.
//!
//! The search works on integer boxes. Every node runs activity-based bound
//! propagation, is bounded by the box relaxation of the objective, and
//! branches on the unfixed variable with the largest objective weight:
//! the objective-greedy value is tried first, the values below and above
//! it are kept as two further children. Every accepted incumbent is
//! polished by a greedy hill climb, and the result is offered as well.
//!
//! Milestones:
//!
//! - `Presolve` once, after root propagation, when presolve is enabled
//! - `MipNode` once per node popped from the stack
//! - `MipSolution` once per strictly improving incumbent, right after it
//!   was committed to the scope

mod heuristic;
mod problem;
mod propagation;

use mipforge_core::{MipError, MipEvent, Model};
use tracing::{debug, info};

use self::problem::{Domain, Problem, TOLERANCE};
use self::propagation::{propagate, Propagation};
use super::{params, SearchBackend};
use crate::callback::{DispatchOutcome, EventDispatcher};
use crate::scope::SearchScope;
use crate::settings::SolveSettings;
use crate::status::SolveStatus;

/// Nodes between two progress log lines.
const LOG_INTERVAL_NODES: u64 = 100_000;

/// Built-in branch-and-bound backend for pure integer models with finite
/// variable bounds.
#[derive(Debug, Clone, Default)]
pub struct BranchAndBound {
    /// Best internal objective so far; maximized.
    best: Option<f64>,
}

impl BranchAndBound {
    pub fn new() -> Self {
        Self::default()
    }

    fn log_output(scope: &SearchScope) -> bool {
        scope.settings().log_output
    }

    /// Offers `values`, then their polished copy if the first offer was
    /// accepted.
    fn improve(
        &mut self,
        model: &Model,
        problem: &Problem,
        values: Vec<f64>,
        scope: &mut SearchScope,
        dispatcher: &mut EventDispatcher,
    ) -> DispatchOutcome {
        match self.offer(model, problem, values, scope, dispatcher) {
            Some(DispatchOutcome::Continue) => {}
            outcome => return outcome.unwrap_or(DispatchOutcome::Continue),
        }
        if scope.is_terminated() {
            return DispatchOutcome::Continue;
        }
        let polished = scope
            .incumbent()
            .and_then(|incumbent| heuristic::polish(problem, incumbent.values()));
        match polished {
            Some(values) => self
                .offer(model, problem, values, scope, dispatcher)
                .unwrap_or(DispatchOutcome::Continue),
            None => DispatchOutcome::Continue,
        }
    }

    /// Commits `values` if they strictly improve on the incumbent and fires
    /// `MipSolution`. Returns `None` when the point was rejected.
    fn offer(
        &mut self,
        model: &Model,
        problem: &Problem,
        values: Vec<f64>,
        scope: &mut SearchScope,
        dispatcher: &mut EventDispatcher,
    ) -> Option<DispatchOutcome> {
        if !model.is_feasible(&values, TOLERANCE) {
            return None;
        }
        let internal = problem.value(&values);
        if self.best.is_some_and(|best| !improves(internal, best)) {
            return None;
        }
        self.best = Some(internal);

        let objective = model.objective_value(&values);
        scope.commit_incumbent(values, objective);

        if Self::log_output(scope) {
            info!(
                event = "incumbent",
                solution = scope.solution_count(),
                objective = objective,
                nodes = scope.node_count(),
                elapsed_ms = scope.elapsed().as_millis() as u64,
            );
        } else {
            debug!(
                "New incumbent #{} with objective {} at node {}",
                scope.solution_count(),
                objective,
                scope.node_count()
            );
        }
        Some(dispatcher.dispatch(MipEvent::MipSolution, scope))
    }

    /// Explores the tree from `root`; returns true if it was exhausted.
    fn search(
        &mut self,
        model: &Model,
        problem: &Problem,
        root: Domain,
        scope: &mut SearchScope,
        dispatcher: &mut EventDispatcher,
    ) -> bool {
        let mut stack = vec![root];

        while let Some(mut domain) = stack.pop() {
            if scope.is_terminated() {
                return false;
            }
            let nodes = scope.increment_node_count();
            if nodes % LOG_INTERVAL_NODES == 0 && Self::log_output(scope) {
                info!(
                    event = "progress",
                    nodes = nodes,
                    open = stack.len(),
                    incumbents = scope.solution_count(),
                    elapsed_ms = scope.elapsed().as_millis() as u64,
                );
            }
            if dispatcher.dispatch(MipEvent::MipNode, scope) == DispatchOutcome::Stop {
                scope.request_stop();
                return false;
            }

            if propagate(&problem.rows, &mut domain) == Propagation::Infeasible {
                scope.record_pruned();
                continue;
            }
            if let Some(best) = self.best {
                if !improves(problem.bound(&domain), best) {
                    scope.record_pruned();
                    continue;
                }
            }

            match problem.branching_variable(&domain) {
                None => {
                    let values = domain.lower;
                    if self.improve(model, problem, values, scope, dispatcher)
                        == DispatchOutcome::Stop
                    {
                        scope.request_stop();
                    }
                }
                Some(var) => {
                    let value = problem.preferred_value(&domain, var);
                    if value - 1.0 >= domain.lower[var] {
                        stack.push(domain.with_upper(var, value - 1.0));
                    }
                    if value + 1.0 <= domain.upper[var] {
                        stack.push(domain.with_lower(var, value + 1.0));
                    }
                    stack.push(domain.fixed(var, value));
                }
            }
        }
        true
    }
}

/// Strict improvement with a relative tolerance.
fn improves(candidate: f64, best: f64) -> bool {
    candidate > best + 1e-9 * best.abs().max(1.0)
}

impl SearchBackend for BranchAndBound {
    fn name(&self) -> &'static str {
        "BNB_INTEGER_PROGRAMMING"
    }

    fn apply_parameters(
        &mut self,
        parameters: &str,
        settings: &mut SolveSettings,
    ) -> Result<(), MipError> {
        params::apply_parameters(parameters, settings)
    }

    fn validate(&self, model: &Model) -> Result<(), MipError> {
        Problem::validate(model)
    }

    fn solve(
        &mut self,
        model: &Model,
        scope: &mut SearchScope,
        dispatcher: &mut EventDispatcher,
    ) -> SolveStatus {
        self.best = None;
        let problem = match Problem::from_model(model) {
            Ok(problem) => problem,
            Err(err) => {
                debug!("Rejected model: {}", err);
                return SolveStatus::ModelInvalid;
            }
        };

        let mut root = problem.root();
        if scope.settings().presolve {
            let outcome = propagate(&problem.rows, &mut root);
            if let Propagation::Consistent(tightened) = outcome {
                scope.record_presolve_tightenings(tightened);
            }
            debug!(
                "Presolve finished: {:?} on {} variables and {} rows",
                outcome,
                model.num_variables(),
                model.num_constraints()
            );
            let stop = dispatcher.dispatch(MipEvent::Presolve, scope) == DispatchOutcome::Stop;
            if outcome == Propagation::Infeasible {
                return SolveStatus::Infeasible;
            }
            if stop {
                scope.request_stop();
                return SolveStatus::NotSolved;
            }
        }

        if !root.is_empty() {
            let point = root.zero_point();
            if self.improve(model, &problem, point, scope, dispatcher) == DispatchOutcome::Stop {
                scope.request_stop();
            }
        }

        let exhausted = self.search(model, &problem, root, scope, dispatcher);
        match (exhausted, scope.incumbent().is_some()) {
            (true, true) => SolveStatus::Optimal,
            (true, false) => SolveStatus::Infeasible,
            (false, true) => SolveStatus::Feasible,
            (false, false) => SolveStatus::NotSolved,
        }
    }
}
