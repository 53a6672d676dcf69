//! Search events observable by a callback.

use std::fmt;

/// The closed set of milestones at which the search invokes a callback.
///
/// Only [`MipEvent::MipSolution`] carries a committed incumbent; variable
/// values can be queried exclusively during that event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MipEvent {
    /// Fired once before the tree search starts, when presolve is enabled.
    Presolve,
    /// Fired once per explored branch-and-bound node.
    MipNode,
    /// Fired once per new incumbent integer-feasible solution.
    MipSolution,
}

impl MipEvent {
    /// All event kinds, in dispatch-index order.
    pub const ALL: [MipEvent; 3] = [MipEvent::Presolve, MipEvent::MipNode, MipEvent::MipSolution];

    /// Returns true if an incumbent is committed whenever this event fires.
    #[inline]
    pub fn has_incumbent(self) -> bool {
        matches!(self, MipEvent::MipSolution)
    }

    /// Dense index of this event, usable for per-event counters.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            MipEvent::Presolve => 0,
            MipEvent::MipNode => 1,
            MipEvent::MipSolution => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MipEvent::Presolve => "PRESOLVE",
            MipEvent::MipNode => "MIP_NODE",
            MipEvent::MipSolution => "MIP_SOLUTION",
        }
    }
}

impl fmt::Display for MipEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
