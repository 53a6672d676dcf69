//! Read-only accessor onto the search's incumbent.

use mipforge_core::{MipError, SolutionSnapshot, Variable};

/// Borrowed, read-only view of the incumbent owned by the search loop.
///
/// The accessor never copies the values; it is as cheap to pass around as
/// a reference and cannot outlive the invocation it was created for.
#[derive(Debug, Clone, Copy)]
pub struct SolutionSnapshotAccessor<'a> {
    snapshot: &'a SolutionSnapshot,
}

impl<'a> SolutionSnapshotAccessor<'a> {
    pub fn new(snapshot: &'a SolutionSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn value(&self, variable: Variable) -> Result<f64, MipError> {
        self.snapshot.value(variable)
    }

    pub fn values(&self) -> &'a [f64] {
        self.snapshot.values()
    }

    pub fn objective_value(&self) -> f64 {
        self.snapshot.objective_value()
    }
}
