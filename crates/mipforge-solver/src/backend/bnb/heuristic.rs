//! Greedy improvement of feasible points.
//!
//! A hill climb over single-variable moves: each variable with a nonzero
//! cost is pushed toward its better bound by the largest integer step the
//! variable bounds and the row slacks allow. Only strictly improving moves
//! are taken, so a polished point is never worse than its input.

use super::problem::Problem;

/// Sweeps over the variables before giving up on reaching a fixed point.
const MAX_PASSES: usize = 16;

/// Polishes a feasible `point`; returns `None` when no variable could move.
pub(crate) fn polish(problem: &Problem, point: &[f64]) -> Option<Vec<f64>> {
    let bounds = problem.bounds();
    let mut values = point.to_vec();
    let mut activity: Vec<f64> = problem
        .rows
        .iter()
        .map(|row| row.terms.iter().map(|&(var, coef)| coef * values[var]).sum())
        .collect();

    let mut moved = false;
    for _ in 0..MAX_PASSES {
        let mut changed = false;
        for &var in &problem.branching_order {
            let cost = problem.costs[var];
            if cost == 0.0 {
                // Branching order puts zero costs last.
                break;
            }
            let direction = cost.signum();
            let mut step = if direction > 0.0 {
                bounds.upper[var] - values[var]
            } else {
                values[var] - bounds.lower[var]
            };
            for &(index, coef) in &problem.columns[var] {
                let row = &problem.rows[index];
                let delta = coef * direction;
                let room = if delta > 0.0 {
                    (row.upper - activity[index]) / delta
                } else {
                    (activity[index] - row.lower) / -delta
                };
                step = step.min(room.floor());
            }
            if step < 1.0 {
                continue;
            }

            values[var] += direction * step;
            for &(index, coef) in &problem.columns[var] {
                activity[index] += coef * direction * step;
            }
            changed = true;
        }
        if !changed {
            break;
        }
        moved = true;
    }
    moved.then_some(values)
}
