//! Solve status.

use std::fmt;

/// Outcome of [`Solver::solve`](crate::Solver::solve).
///
/// A failing callback never changes the status; failures are reported
/// separately through the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// The search space was exhausted and the incumbent is optimal.
    Optimal,
    /// The search stopped early with an incumbent.
    Feasible,
    /// The search space was exhausted without an incumbent.
    Infeasible,
    /// The search stopped early without an incumbent, or never ran.
    NotSolved,
    /// The backend rejected the model.
    ModelInvalid,
    /// The solver-specific parameter string could not be applied.
    InvalidParameters,
}

impl SolveStatus {
    /// Returns true if a solution is available.
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }

    pub fn is_optimal(self) -> bool {
        self == SolveStatus::Optimal
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::NotSolved => "NOT_SOLVED",
            SolveStatus::ModelInvalid => "MODEL_INVALID",
            SolveStatus::InvalidParameters => "INVALID_PARAMETERS",
        };
        f.write_str(name)
    }
}
