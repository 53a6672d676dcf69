//! Internal representation of a pure integer model.

use mipforge_core::{MipError, Model};

/// Tolerance used when rounding bounds and comparing activities.
pub(crate) const TOLERANCE: f64 = 1e-6;

/// Largest bound magnitude at which consecutive integers are distinct `f64`s.
pub(crate) const MAX_EXACT_BOUND: f64 = 9_007_199_254_740_992.0;

/// Bounds of every variable at one search node.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Domain {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Domain {
    pub fn is_fixed(&self, var: usize) -> bool {
        self.lower[var] >= self.upper[var]
    }

    pub fn is_empty(&self) -> bool {
        self.lower
            .iter()
            .zip(&self.upper)
            .any(|(lower, upper)| lower > upper)
    }

    /// Returns a copy with `var` fixed to `value`.
    pub fn fixed(&self, var: usize, value: f64) -> Self {
        let mut domain = self.clone();
        domain.lower[var] = value;
        domain.upper[var] = value;
        domain
    }

    pub fn with_upper(&self, var: usize, upper: f64) -> Self {
        let mut domain = self.clone();
        domain.upper[var] = upper;
        domain
    }

    pub fn with_lower(&self, var: usize, lower: f64) -> Self {
        let mut domain = self.clone();
        domain.lower[var] = lower;
        domain
    }

    /// The point closest to zero inside the box.
    pub fn zero_point(&self) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(&lower, &upper)| 0.0_f64.clamp(lower, upper))
            .collect()
    }
}

/// Sparse row `lower <= sum(coef * x) <= upper`.
#[derive(Debug, Clone)]
pub(crate) struct Row {
    pub terms: Vec<(usize, f64)>,
    pub lower: f64,
    pub upper: f64,
}

/// A model rewritten as a maximization over integer boxes.
#[derive(Debug, Clone)]
pub(crate) struct Problem {
    /// Objective coefficients, negated for minimization models.
    pub costs: Vec<f64>,
    pub rows: Vec<Row>,
    /// Per variable, the rows it appears in with its coefficient.
    pub columns: Vec<Vec<(usize, f64)>>,
    /// Variable indices by decreasing absolute cost.
    pub branching_order: Vec<usize>,
    root: Domain,
}

impl Problem {
    /// Checks that `model` is pure integer with finite, exactly representable
    /// bounds.
    pub fn validate(model: &Model) -> Result<(), MipError> {
        for data in model.variables_data() {
            if !data.integer {
                return Err(MipError::ModelInvalid(format!(
                    "variable '{}' is continuous; branch-and-bound requires integer variables",
                    data.name
                )));
            }
            if !data.is_bounded() {
                return Err(MipError::ModelInvalid(format!(
                    "variable '{}' has an infinite bound",
                    data.name
                )));
            }
            if data.lower_bound.abs() > MAX_EXACT_BOUND
                || data.upper_bound.abs() > MAX_EXACT_BOUND
            {
                return Err(MipError::ModelInvalid(format!(
                    "variable '{}' has a bound beyond the exactly representable integers",
                    data.name
                )));
            }
        }
        for data in model.constraints_data() {
            if data.lower_bound.is_nan() || data.upper_bound.is_nan() {
                return Err(MipError::ModelInvalid(format!(
                    "constraint '{}' has a NaN bound",
                    data.name
                )));
            }
        }
        Ok(())
    }

    pub fn from_model(model: &Model) -> Result<Self, MipError> {
        Self::validate(model)?;

        let sign = if model.objective().is_maximization() {
            1.0
        } else {
            -1.0
        };
        let mut costs = vec![0.0; model.num_variables()];
        for (index, coef) in model.objective().terms() {
            costs[index] = sign * coef;
        }

        let rows: Vec<Row> = model
            .constraints_data()
            .iter()
            .map(|data| Row {
                terms: data.terms().filter(|&(_, coef)| coef != 0.0).collect(),
                lower: data.lower_bound,
                upper: data.upper_bound,
            })
            .collect();

        let mut columns = vec![Vec::new(); costs.len()];
        for (index, row) in rows.iter().enumerate() {
            for &(var, coef) in &row.terms {
                columns[var].push((index, coef));
            }
        }

        let (lower, upper) = model
            .variables_data()
            .iter()
            .map(|data| {
                (
                    (data.lower_bound - TOLERANCE).ceil(),
                    (data.upper_bound + TOLERANCE).floor(),
                )
            })
            .unzip();

        let mut branching_order: Vec<usize> = (0..costs.len()).collect();
        branching_order.sort_by(|&a, &b| costs[b].abs().total_cmp(&costs[a].abs()));

        Ok(Self {
            costs,
            rows,
            columns,
            branching_order,
            root: Domain { lower, upper },
        })
    }

    pub fn root(&self) -> Domain {
        self.root.clone()
    }

    /// Variable bounds of the model after integer rounding.
    pub fn bounds(&self) -> &Domain {
        &self.root
    }

    /// Internal (maximized) objective of a point, without offset.
    pub fn value(&self, values: &[f64]) -> f64 {
        self.costs.iter().zip(values).map(|(c, v)| c * v).sum()
    }

    /// Upper bound on the internal objective over the box.
    pub fn bound(&self, domain: &Domain) -> f64 {
        self.costs
            .iter()
            .enumerate()
            .map(|(var, &cost)| {
                if cost >= 0.0 {
                    cost * domain.upper[var]
                } else {
                    cost * domain.lower[var]
                }
            })
            .sum()
    }

    /// First unfixed variable in branching order.
    pub fn branching_variable(&self, domain: &Domain) -> Option<usize> {
        self.branching_order
            .iter()
            .copied()
            .find(|&var| !domain.is_fixed(var))
    }

    /// Value tried first for `var`: the objective-greedy bound, or the
    /// point closest to zero for variables without cost.
    pub fn preferred_value(&self, domain: &Domain, var: usize) -> f64 {
        let cost = self.costs[var];
        if cost > 0.0 {
            domain.upper[var]
        } else if cost < 0.0 {
            domain.lower[var]
        } else {
            0.0_f64.clamp(domain.lower[var], domain.upper[var])
        }
    }
}
