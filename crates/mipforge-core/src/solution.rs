//! Solution snapshots.

use crate::error::{MipError, Result};
use crate::model::{ModelId, Variable};

/// Values of every declared variable at one point of the search.
///
/// The search loop owns the snapshot of its current incumbent; callbacks
/// only ever borrow it. After solving, the retained incumbent is reported
/// as the final solution, so the last snapshot a callback observed and the
/// reported solution are the same values.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionSnapshot {
    model: ModelId,
    values: Vec<f64>,
    objective_value: f64,
}

impl SolutionSnapshot {
    pub fn new(model: ModelId, values: Vec<f64>, objective_value: f64) -> Self {
        Self {
            model,
            values,
            objective_value,
        }
    }

    pub fn model_id(&self) -> ModelId {
        self.model
    }

    /// Values in variable declaration order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value of `var`, rejecting handles of other models.
    pub fn value(&self, var: Variable) -> Result<f64> {
        if var.model_id() != self.model {
            return Err(MipError::UnknownVariable(format!(
                "{} does not belong to the solved model ({})",
                var, self.model
            )));
        }
        self.values.get(var.index()).copied().ok_or_else(|| {
            MipError::UnknownVariable(format!(
                "{} is out of range for a snapshot of {} variables",
                var,
                self.values.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    #[test]
    fn test_value_lookup() {
        let mut model = Model::new("m");
        let x = model.make_int_var(0.0, 5.0, "x");
        let y = model.make_int_var(0.0, 5.0, "y");

        let snapshot = SolutionSnapshot::new(model.id(), vec![3.0, 1.0], 7.0);
        assert_eq!(snapshot.value(x).unwrap(), 3.0);
        assert_eq!(snapshot.value(y).unwrap(), 1.0);
        assert_eq!(snapshot.objective_value(), 7.0);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_foreign_variable_is_unknown() {
        let mut model = Model::new("m");
        model.make_int_var(0.0, 5.0, "x");
        let mut other = Model::new("other");
        let foreign = other.make_int_var(0.0, 5.0, "x");

        let snapshot = SolutionSnapshot::new(model.id(), vec![1.0], 1.0);
        assert!(matches!(
            snapshot.value(foreign),
            Err(MipError::UnknownVariable(_))
        ));
    }

    #[test]
    fn test_variable_added_after_snapshot_is_unknown() {
        let mut model = Model::new("m");
        model.make_int_var(0.0, 5.0, "x");
        let snapshot = SolutionSnapshot::new(model.id(), vec![1.0], 1.0);
        let late = model.make_int_var(0.0, 5.0, "late");

        assert!(matches!(
            snapshot.value(late),
            Err(MipError::UnknownVariable(_))
        ));
    }
}
