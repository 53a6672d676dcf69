//! Mixed-integer model definition.
//!
//! A [`Model`] owns its variables, constraints and objective. Variables and
//! constraints are referenced through copyable handles tagged with the
//! owning model's [`ModelId`], so a handle can never silently address a
//! different model.
//!
//! # Example
//!
//! ```
//! use mipforge_core::Model;
//!
//! let mut model = Model::new("knapsack");
//! let x = model.make_int_var(0.0, 3.0, "x");
//! let y = model.make_int_var(0.0, 5.0, "y");
//!
//! let capacity = model.make_constraint(f64::NEG_INFINITY, 10.0);
//! model.set_constraint_coefficient(capacity, x, 3.0).unwrap();
//! model.set_constraint_coefficient(capacity, y, 2.0).unwrap();
//!
//! model.objective_mut().set_maximization();
//! model.objective_mut().set_coefficient(x, 4.0).unwrap();
//! model.objective_mut().set_coefficient(y, 3.0).unwrap();
//!
//! assert_eq!(model.num_variables(), 2);
//! assert!(model.is_feasible(&[2.0, 2.0], 1e-9));
//! assert_eq!(model.objective_value(&[2.0, 2.0]), 14.0);
//! ```

mod constraint;
mod objective;
mod variable;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub use constraint::{Constraint, ConstraintData};
pub use objective::{Objective, ObjectiveSense};
pub use variable::{Variable, VariableData};

use crate::error::{MipError, Result};

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u64);

impl ModelId {
    fn next() -> Self {
        ModelId(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model#{}", self.0)
    }
}

/// A mixed-integer linear model.
#[derive(Debug, Clone)]
pub struct Model {
    id: ModelId,
    name: String,
    variables: Vec<VariableData>,
    constraints: Vec<ConstraintData>,
    objective: Objective,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        let id = ModelId::next();
        Self {
            id,
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: Objective::new(id),
        }
    }

    #[inline]
    pub fn id(&self) -> ModelId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // === Variables ===

    /// Creates a variable with the given bounds and integrality.
    pub fn make_var(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        integer: bool,
        name: impl Into<String>,
    ) -> Variable {
        let index = self.variables.len();
        self.variables
            .push(VariableData::new(lower_bound, upper_bound, integer, name));
        Variable::new(self.id, index)
    }

    pub fn make_int_var(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        name: impl Into<String>,
    ) -> Variable {
        self.make_var(lower_bound, upper_bound, true, name)
    }

    pub fn make_num_var(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        name: impl Into<String>,
    ) -> Variable {
        self.make_var(lower_bound, upper_bound, false, name)
    }

    pub fn make_bool_var(&mut self, name: impl Into<String>) -> Variable {
        self.make_var(0.0, 1.0, true, name)
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Returns the handle of the `index`-th variable.
    pub fn variable(&self, index: usize) -> Option<Variable> {
        (index < self.variables.len()).then(|| Variable::new(self.id, index))
    }

    /// Iterates over all variable handles in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        (0..self.variables.len()).map(move |index| Variable::new(self.id, index))
    }

    /// Returns true if `var` was created by this model.
    pub fn owns(&self, var: Variable) -> bool {
        var.model_id() == self.id && var.index() < self.variables.len()
    }

    /// Resolves `var` to its position, rejecting foreign handles.
    pub fn index_of(&self, var: Variable) -> Result<usize> {
        if self.owns(var) {
            Ok(var.index())
        } else {
            Err(MipError::UnknownVariable(format!(
                "{} does not belong to model '{}' ({})",
                var, self.name, self.id
            )))
        }
    }

    pub fn variable_data(&self, var: Variable) -> Result<&VariableData> {
        let index = self.index_of(var)?;
        Ok(&self.variables[index])
    }

    pub fn variables_data(&self) -> &[VariableData] {
        &self.variables
    }

    /// Returns true if every variable is integral.
    pub fn is_pure_integer(&self) -> bool {
        self.variables.iter().all(|v| v.integer)
    }

    // === Constraints ===

    pub fn make_constraint(&mut self, lower_bound: f64, upper_bound: f64) -> Constraint {
        let name = format!("c_{}", self.constraints.len());
        self.make_named_constraint(lower_bound, upper_bound, name)
    }

    pub fn make_named_constraint(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        name: impl Into<String>,
    ) -> Constraint {
        let index = self.constraints.len();
        self.constraints.push(ConstraintData::new(
            self.id,
            lower_bound,
            upper_bound,
            name.into(),
        ));
        Constraint::new(self.id, index)
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn constraint(&self, index: usize) -> Option<Constraint> {
        (index < self.constraints.len()).then(|| Constraint::new(self.id, index))
    }

    pub fn constraint_data(&self, constraint: Constraint) -> Result<&ConstraintData> {
        self.check_constraint(constraint)?;
        Ok(&self.constraints[constraint.index()])
    }

    pub fn constraint_mut(&mut self, constraint: Constraint) -> Result<&mut ConstraintData> {
        self.check_constraint(constraint)?;
        Ok(&mut self.constraints[constraint.index()])
    }

    pub fn constraints_data(&self) -> &[ConstraintData] {
        &self.constraints
    }

    /// Sets the coefficient of `var` in `constraint`.
    pub fn set_constraint_coefficient(
        &mut self,
        constraint: Constraint,
        var: Variable,
        coefficient: f64,
    ) -> Result<()> {
        self.index_of(var)?;
        self.constraint_mut(constraint)?
            .set_coefficient(var, coefficient)
    }

    fn check_constraint(&self, constraint: Constraint) -> Result<()> {
        if constraint.model_id() == self.id && constraint.index() < self.constraints.len() {
            Ok(())
        } else {
            Err(MipError::InvalidState(format!(
                "{} does not belong to model '{}' ({})",
                constraint, self.name, self.id
            )))
        }
    }

    // === Objective ===

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn objective_mut(&mut self) -> &mut Objective {
        &mut self.objective
    }

    // === Evaluation ===

    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective.value(values)
    }

    /// Checks bounds, integrality and every constraint within `tolerance`.
    pub fn is_feasible(&self, values: &[f64], tolerance: f64) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }
        let within_bounds = self.variables.iter().zip(values).all(|(data, &value)| {
            value >= data.lower_bound - tolerance
                && value <= data.upper_bound + tolerance
                && (!data.integer || (value - value.round()).abs() <= tolerance)
        });
        within_bounds
            && self
                .constraints
                .iter()
                .all(|c| c.is_satisfied(values, tolerance))
    }
}
