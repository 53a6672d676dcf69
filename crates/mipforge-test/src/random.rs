//! Seeded random integer programs.

use mipforge_core::Model;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Builds a dense maximization model with `n_vars` integer variables.
///
/// Every variable `x_i` gets bounds `[-200 r, 200 r']` and an objective
/// coefficient in `[-100, 100)`. Each variable after the first adds a
/// ranged row over `x_0..=x_i` with coefficients in `[-100, 100)` and a
/// range spanning zero.
///
/// Since every range contains zero, the all-zero point is always
/// feasible. The model is large enough that the search keeps improving its
/// incumbent for a long time, which makes it useful for observing many
/// `MipSolution` events.
pub fn random_integer_program(n_vars: usize, seed: u64) -> Model {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut model = Model::new(format!("random_ip_{}_{}", n_vars, seed));
    model.objective_mut().set_maximization();

    for i in 0..n_vars {
        let lower = -rng.random::<f64>() * 200.0;
        let upper = rng.random::<f64>() * 200.0;
        let x = model.make_int_var(lower, upper, format!("x_{}", i));
        let cost = rng.random::<f64>() * 200.0 - 100.0;
        let _ = model.objective_mut().set_coefficient(x, cost);
        if i == 0 {
            continue;
        }

        let a = -rng.random::<f64>() * 2000.0;
        let b = rng.random::<f64>() * 2000.0;
        let c = model.make_constraint(a.min(b), a.max(b));
        let coef = rng.random::<f64>() * 200.0 - 100.0;
        let _ = model.set_constraint_coefficient(c, x, coef);
        for j in 0..i {
            if let Some(previous) = model.variable(j) {
                let coef = rng.random::<f64>() * 200.0 - 100.0;
                let _ = model.set_constraint_coefficient(c, previous, coef);
            }
        }
    }
    model
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let model = random_integer_program(10, 7);
        assert_eq!(model.num_variables(), 10);
        assert_eq!(model.num_constraints(), 9);
        assert!(model.objective().is_maximization());
        assert!(model.is_pure_integer());

        let last = model.constraints_data().last().unwrap();
        assert_eq!(last.num_terms(), 10);
    }

    #[test]
    fn test_zero_is_feasible() {
        let model = random_integer_program(30, 123);
        let zeros = vec![0.0; model.num_variables()];
        assert!(model.is_feasible(&zeros, 1e-9));
    }

    #[test]
    fn test_same_seed_same_model() {
        let a = random_integer_program(5, 42);
        let b = random_integer_program(5, 42);
        assert_eq!(a.variables_data(), b.variables_data());
        assert_eq!(a.constraints_data().len(), b.constraints_data().len());
    }
}
