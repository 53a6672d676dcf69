//! Small models with known optima.

use mipforge_core::Model;

/// 0/1 knapsack: maximize `values . x` subject to `weights . x <= capacity`.
pub fn knapsack(values: &[f64], weights: &[f64], capacity: f64) -> Model {
    let mut model = Model::new("knapsack");
    model.objective_mut().set_maximization();
    let c = model.make_named_constraint(f64::NEG_INFINITY, capacity, "capacity");
    for (i, (&value, &weight)) in values.iter().zip(weights).enumerate() {
        let x = model.make_bool_var(format!("take_{}", i));
        let _ = model.objective_mut().set_coefficient(x, value);
        let _ = model.set_constraint_coefficient(c, x, weight);
    }
    model
}

/// Four-item knapsack whose optimum takes items 1 and 3 for a value of 21.
pub fn small_knapsack() -> Model {
    knapsack(&[10.0, 13.0, 7.0, 8.0], &[5.0, 6.0, 3.0, 4.0], 10.0)
}

/// A single integer variable in `[0, 3]` constrained to `[5, 6]`.
pub fn infeasible_model() -> Model {
    let mut model = Model::new("infeasible");
    let x = model.make_int_var(0.0, 3.0, "x");
    let c = model.make_constraint(5.0, 6.0);
    let _ = model.set_constraint_coefficient(c, x, 1.0);
    model
}

/// Minimize `x - 2y` over `x, y` in `[-3, 4]` without constraints.
///
/// The optimum is `x = -3, y = 4` with objective `-11`.
pub fn unconstrained_model() -> Model {
    let mut model = Model::new("unconstrained");
    let x = model.make_int_var(-3.0, 4.0, "x");
    let y = model.make_int_var(-3.0, 4.0, "y");
    let objective = model.objective_mut();
    objective.set_minimization();
    let _ = objective.set_coefficient(x, 1.0);
    let _ = objective.set_coefficient(y, -2.0);
    model
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_knapsack_optimum_is_feasible() {
        let model = small_knapsack();
        let best = [0.0, 1.0, 0.0, 1.0];
        assert!(model.is_feasible(&best, 1e-9));
        assert_eq!(model.objective_value(&best), 21.0);
        assert!(!model.is_feasible(&[1.0, 1.0, 0.0, 0.0], 1e-9));
    }

    #[test]
    fn test_infeasible_model_rejects_every_value() {
        let model = infeasible_model();
        for x in 0..=3 {
            assert!(!model.is_feasible(&[x as f64], 1e-9));
        }
    }
}
