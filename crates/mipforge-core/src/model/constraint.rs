//! Linear range constraints.

use std::collections::BTreeMap;
use std::fmt;

use super::{ModelId, Variable};
use crate::error::{MipError, Result};

/// Handle to a linear constraint of a [`Model`](super::Model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constraint {
    model: ModelId,
    index: usize,
}

impl Constraint {
    pub(crate) fn new(model: ModelId, index: usize) -> Self {
        Self { model, index }
    }

    #[inline]
    pub fn model_id(&self) -> ModelId {
        self.model
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ct#{}@{}", self.index, self.model)
    }
}

/// A range constraint `lower_bound <= sum(coef * var) <= upper_bound`.
///
/// Either bound may be infinite.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintData {
    model: ModelId,
    pub name: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    terms: BTreeMap<usize, f64>,
}

impl ConstraintData {
    pub(crate) fn new(model: ModelId, lower_bound: f64, upper_bound: f64, name: String) -> Self {
        Self {
            model,
            name,
            lower_bound,
            upper_bound,
            terms: BTreeMap::new(),
        }
    }

    /// Sets the coefficient of `var`, replacing any previous coefficient.
    pub fn set_coefficient(&mut self, var: Variable, coefficient: f64) -> Result<()> {
        if var.model_id() != self.model {
            return Err(MipError::UnknownVariable(format!(
                "{} is not part of constraint '{}' model {}",
                var, self.name, self.model
            )));
        }
        self.terms.insert(var.index(), coefficient);
        Ok(())
    }

    /// Returns the coefficient of `var`, zero if it has none.
    pub fn coefficient(&self, var: Variable) -> f64 {
        if var.model_id() != self.model {
            return 0.0;
        }
        self.terms.get(&var.index()).copied().unwrap_or(0.0)
    }

    /// Iterates over `(variable index, coefficient)` pairs in index order.
    pub fn terms(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.terms.iter().map(|(&index, &coef)| (index, coef))
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Computes the row activity for a full assignment of values.
    pub fn activity(&self, values: &[f64]) -> f64 {
        self.terms()
            .map(|(index, coef)| coef * values.get(index).copied().unwrap_or(0.0))
            .sum()
    }

    /// Returns true if the activity of `values` lies within the range,
    /// up to `tolerance`.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let activity = self.activity(values);
        activity >= self.lower_bound - tolerance && activity <= self.upper_bound + tolerance
    }
}
