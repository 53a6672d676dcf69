//! Activity-based bound propagation.

use super::problem::{Domain, Row, TOLERANCE};

/// Upper limit on sweeps over all rows per propagation call.
pub(crate) const MAX_PROPAGATION_PASSES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Propagation {
    /// The box may still contain feasible points; holds the number of
    /// bounds tightened.
    Consistent(u64),
    /// Some row cannot be satisfied inside the box.
    Infeasible,
}

/// Tightens `domain` against every row until a fixpoint or the pass limit.
///
/// For a row `lo <= a.x <= hi` with minimum activity `min` and maximum
/// activity `max` over the box, each term `a_j x_j` is bounded by
/// `hi - (min - min_j)` from above and `lo - (max - max_j)` from below,
/// where `min_j` and `max_j` are the term's own contributions. Bounds are
/// rounded inward since every variable is integral.
pub(crate) fn propagate(rows: &[Row], domain: &mut Domain) -> Propagation {
    if domain.is_empty() {
        return Propagation::Infeasible;
    }

    let mut tightened = 0;
    for _ in 0..MAX_PROPAGATION_PASSES {
        let mut changed = false;
        for row in rows {
            match propagate_row(row, domain) {
                Some(count) => {
                    tightened += count;
                    changed |= count > 0;
                }
                None => return Propagation::Infeasible,
            }
        }
        if !changed {
            break;
        }
    }
    Propagation::Consistent(tightened)
}

fn term_range(coef: f64, lower: f64, upper: f64) -> (f64, f64) {
    if coef > 0.0 {
        (coef * lower, coef * upper)
    } else {
        (coef * upper, coef * lower)
    }
}

/// Returns `None` if the row is violated, else the number of tightenings.
fn propagate_row(row: &Row, domain: &mut Domain) -> Option<u64> {
    let (min_activity, max_activity) = row.terms.iter().fold((0.0, 0.0), |(min, max), &(var, coef)| {
        let (lo, hi) = term_range(coef, domain.lower[var], domain.upper[var]);
        (min + lo, max + hi)
    });

    let slack = TOLERANCE * (1.0 + row.lower.abs().min(row.upper.abs()));
    if min_activity > row.upper + slack || max_activity < row.lower - slack {
        return None;
    }

    let mut tightened = 0;
    for &(var, coef) in &row.terms {
        let (term_min, term_max) = term_range(coef, domain.lower[var], domain.upper[var]);
        // Bounds on coef * x implied by the other terms.
        let term_upper = row.upper - (min_activity - term_min);
        let term_lower = row.lower - (max_activity - term_max);

        let (new_lower, new_upper) = if coef > 0.0 {
            (term_lower / coef, term_upper / coef)
        } else {
            (term_upper / coef, term_lower / coef)
        };

        if new_upper.is_finite() {
            let rounded = (new_upper + TOLERANCE).floor();
            if rounded < domain.upper[var] {
                domain.upper[var] = rounded;
                tightened += 1;
            }
        }
        if new_lower.is_finite() {
            let rounded = (new_lower - TOLERANCE).ceil();
            if rounded > domain.lower[var] {
                domain.lower[var] = rounded;
                tightened += 1;
            }
        }
        if domain.lower[var] > domain.upper[var] {
            return None;
        }
    }
    Some(tightened)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(bounds: &[(f64, f64)]) -> Domain {
        Domain {
            lower: bounds.iter().map(|b| b.0).collect(),
            upper: bounds.iter().map(|b| b.1).collect(),
        }
    }

    #[test]
    fn test_tightens_upper_bounds() {
        // x + 2y <= 4 over x, y in [0, 10]
        let rows = vec![Row {
            terms: vec![(0, 1.0), (1, 2.0)],
            lower: f64::NEG_INFINITY,
            upper: 4.0,
        }];
        let mut d = domain(&[(0.0, 10.0), (0.0, 10.0)]);

        assert_eq!(propagate(&rows, &mut d), Propagation::Consistent(2));
        assert_eq!(d.upper, vec![4.0, 2.0]);
    }

    #[test]
    fn test_negative_coefficient_tightens_lower_bound() {
        // -x >= -3 over x in [0, 10]  =>  x <= 3
        // x - y >= 2 over y in [0, 10] =>  y <= 1, x >= 2
        let rows = vec![
            Row {
                terms: vec![(0, -1.0)],
                lower: -3.0,
                upper: f64::INFINITY,
            },
            Row {
                terms: vec![(0, 1.0), (1, -1.0)],
                lower: 2.0,
                upper: f64::INFINITY,
            },
        ];
        let mut d = domain(&[(0.0, 10.0), (0.0, 10.0)]);

        assert!(matches!(propagate(&rows, &mut d), Propagation::Consistent(_)));
        assert_eq!(d.lower, vec![2.0, 0.0]);
        assert_eq!(d.upper, vec![3.0, 1.0]);
    }

    #[test]
    fn test_detects_infeasible_row() {
        // x + y >= 5 over x, y in [0, 2]
        let rows = vec![Row {
            terms: vec![(0, 1.0), (1, 1.0)],
            lower: 5.0,
            upper: f64::INFINITY,
        }];
        let mut d = domain(&[(0.0, 2.0), (0.0, 2.0)]);

        assert_eq!(propagate(&rows, &mut d), Propagation::Infeasible);
    }

    #[test]
    fn test_empty_domain_is_infeasible() {
        let mut d = domain(&[(1.0, 0.0)]);
        assert_eq!(propagate(&[], &mut d), Propagation::Infeasible);
    }

    #[test]
    fn test_fractional_bound_rounds_inward() {
        // 2x <= 5 over x in [0, 10]  =>  x <= 2
        let rows = vec![Row {
            terms: vec![(0, 2.0)],
            lower: f64::NEG_INFINITY,
            upper: 5.0,
        }];
        let mut d = domain(&[(0.0, 10.0)]);

        propagate(&rows, &mut d);
        assert_eq!(d.upper, vec![2.0]);
    }
}
