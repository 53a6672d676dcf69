//! Linear objective.

use std::collections::BTreeMap;

use super::{ModelId, Variable};
use crate::error::{MipError, Result};

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectiveSense {
    #[default]
    Minimize,
    Maximize,
}

/// Linear objective `offset + sum(coef * var)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    model: ModelId,
    sense: ObjectiveSense,
    offset: f64,
    terms: BTreeMap<usize, f64>,
}

impl Objective {
    pub(crate) fn new(model: ModelId) -> Self {
        Self {
            model,
            sense: ObjectiveSense::Minimize,
            offset: 0.0,
            terms: BTreeMap::new(),
        }
    }

    /// Sets the objective coefficient of `var`, replacing any previous one.
    pub fn set_coefficient(&mut self, var: Variable, coefficient: f64) -> Result<()> {
        if var.model_id() != self.model {
            return Err(MipError::UnknownVariable(format!(
                "{} is not part of objective of model {}",
                var, self.model
            )));
        }
        self.terms.insert(var.index(), coefficient);
        Ok(())
    }

    pub fn coefficient(&self, var: Variable) -> f64 {
        if var.model_id() != self.model {
            return 0.0;
        }
        self.terms.get(&var.index()).copied().unwrap_or(0.0)
    }

    pub fn terms(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.terms.iter().map(|(&index, &coef)| (index, coef))
    }

    pub fn set_maximization(&mut self) {
        self.sense = ObjectiveSense::Maximize;
    }

    pub fn set_minimization(&mut self) {
        self.sense = ObjectiveSense::Minimize;
    }

    pub fn set_sense(&mut self, sense: ObjectiveSense) {
        self.sense = sense;
    }

    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    pub fn is_maximization(&self) -> bool {
        self.sense == ObjectiveSense::Maximize
    }

    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Evaluates the objective for a full assignment of values.
    pub fn value(&self, values: &[f64]) -> f64 {
        self.offset
            + self
                .terms()
                .map(|(index, coef)| coef * values.get(index).copied().unwrap_or(0.0))
                .sum::<f64>()
    }
}
