//! Search backends.
//!
//! A backend owns the search algorithm. The solver hands it the model, a
//! [`SearchScope`] holding the incumbent and limits, and an
//! [`EventDispatcher`] to fire milestones through.

pub mod bnb;
pub mod params;

use std::fmt::{self, Debug};
use std::str::FromStr;

use mipforge_core::{MipError, Model};

use crate::callback::EventDispatcher;
use crate::scope::SearchScope;
use crate::settings::SolveSettings;
use crate::status::SolveStatus;

pub use bnb::BranchAndBound;

/// The seam at which a concrete search engine plugs into the solver.
///
/// Backends must fire milestones only through the dispatcher, and only
/// once the state they describe is committed: [`MipEvent::MipSolution`]
/// right after [`SearchScope::commit_incumbent`], never before.
///
/// [`MipEvent::MipSolution`]: mipforge_core::MipEvent::MipSolution
pub trait SearchBackend: Send + Debug {
    /// Solver kind name of this backend.
    fn name(&self) -> &'static str;

    /// Applies the solver-specific parameter string to `settings`.
    ///
    /// The default implementation accepts no parameters and ignores any
    /// string it is given.
    fn apply_parameters(
        &mut self,
        parameters: &str,
        settings: &mut SolveSettings,
    ) -> Result<(), MipError> {
        let _ = settings;
        if !parameters.trim().is_empty() {
            tracing::warn!(
                "Backend {} ignores solver-specific parameters '{}'",
                self.name(),
                parameters
            );
        }
        Ok(())
    }

    /// Checks that the backend can solve `model`.
    fn validate(&self, model: &Model) -> Result<(), MipError>;

    /// Runs the search until it is exhausted or `scope` terminates.
    fn solve(
        &mut self,
        model: &Model,
        scope: &mut SearchScope,
        dispatcher: &mut EventDispatcher,
    ) -> SolveStatus;
}

/// Solver kinds recognised by [`Solver::create_solver`](crate::Solver::create_solver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    /// Built-in depth-first integer branch-and-bound.
    BranchAndBound,
    Xpress,
    Gurobi,
    Cplex,
    Scip,
    Cbc,
}

impl SolverKind {
    pub const ALL: [SolverKind; 6] = [
        SolverKind::BranchAndBound,
        SolverKind::Xpress,
        SolverKind::Gurobi,
        SolverKind::Cplex,
        SolverKind::Scip,
        SolverKind::Cbc,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SolverKind::BranchAndBound => "BNB_INTEGER_PROGRAMMING",
            SolverKind::Xpress => "XPRESS_MIXED_INTEGER_PROGRAMMING",
            SolverKind::Gurobi => "GUROBI_MIXED_INTEGER_PROGRAMMING",
            SolverKind::Cplex => "CPLEX_MIXED_INTEGER_PROGRAMMING",
            SolverKind::Scip => "SCIP_MIXED_INTEGER_PROGRAMMING",
            SolverKind::Cbc => "CBC_MIXED_INTEGER_PROGRAMMING",
        }
    }

    fn short_name(self) -> &'static str {
        match self {
            SolverKind::BranchAndBound => "BNB",
            SolverKind::Xpress => "XPRESS",
            SolverKind::Gurobi => "GUROBI",
            SolverKind::Cplex => "CPLEX",
            SolverKind::Scip => "SCIP",
            SolverKind::Cbc => "CBC",
        }
    }

    /// Returns true if this build can create a backend of this kind.
    ///
    /// Only the built-in branch-and-bound is linked in; native commercial
    /// and third-party engines are recognised but unavailable.
    pub fn is_available(self) -> bool {
        matches!(self, SolverKind::BranchAndBound)
    }

    /// Creates a backend of this kind, if available.
    pub fn create_backend(self) -> Option<Box<dyn SearchBackend>> {
        match self {
            SolverKind::BranchAndBound => Some(Box::new(BranchAndBound::new())),
            _ => None,
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverKind {
    type Err = MipError;

    /// Parses a kind from its full or short name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SolverKind::ALL
            .into_iter()
            .find(|kind| {
                s.eq_ignore_ascii_case(kind.name()) || s.eq_ignore_ascii_case(kind.short_name())
            })
            .ok_or_else(|| MipError::Config(format!("unknown solver kind '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_and_short_names() {
        assert_eq!(
            "BNB_INTEGER_PROGRAMMING".parse::<SolverKind>().unwrap(),
            SolverKind::BranchAndBound
        );
        assert_eq!("bnb".parse::<SolverKind>().unwrap(), SolverKind::BranchAndBound);
        assert_eq!(
            "XPRESS_MIXED_INTEGER_PROGRAMMING".parse::<SolverKind>().unwrap(),
            SolverKind::Xpress
        );
        assert_eq!("Gurobi".parse::<SolverKind>().unwrap(), SolverKind::Gurobi);
    }

    #[test]
    fn test_unknown_kind() {
        assert!(matches!(
            "GLOP_LINEAR_PROGRAMMING".parse::<SolverKind>(),
            Err(MipError::Config(_))
        ));
    }

    #[test]
    fn test_only_builtin_backend_is_available() {
        for kind in SolverKind::ALL {
            assert_eq!(kind.is_available(), kind.create_backend().is_some());
        }
        assert!(SolverKind::BranchAndBound.is_available());
        assert!(!SolverKind::Xpress.is_available());
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for kind in SolverKind::ALL {
            assert_eq!(kind.to_string().parse::<SolverKind>().unwrap(), kind);
        }
    }
}
