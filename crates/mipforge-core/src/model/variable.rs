//! Decision variables.

use std::fmt;

use super::ModelId;

/// Handle to a decision variable of a [`Model`](super::Model).
///
/// Handles are cheap to copy and remain valid for the lifetime of the
/// model that created them. A handle created by one model is rejected by
/// every other model with [`MipError::UnknownVariable`](crate::MipError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    model: ModelId,
    index: usize,
}

impl Variable {
    pub(crate) fn new(model: ModelId, index: usize) -> Self {
        Self { model, index }
    }

    /// Returns the id of the model owning this variable.
    #[inline]
    pub fn model_id(&self) -> ModelId {
        self.model
    }

    /// Returns the position of this variable in its model.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "var#{}@{}", self.index, self.model)
    }
}

/// Declared data of a decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableData {
    pub name: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub integer: bool,
}

impl VariableData {
    pub fn new(lower_bound: f64, upper_bound: f64, integer: bool, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lower_bound,
            upper_bound,
            integer,
        }
    }

    /// Returns true if both bounds are finite.
    pub fn is_bounded(&self) -> bool {
        self.lower_bound.is_finite() && self.upper_bound.is_finite()
    }
}
