//! Bounded Nelder-Mead simplex minimization.
//!
//! Why Nelder-Mead?
//! - the CSS objective is cheap but not differentiable in closed form here
//! - parameter counts are tiny (at most eight coefficients per candidate)
//! - it is deterministic given the same start point and bounds
//!
//! Bounds are enforced by clamping every trial vertex, which is adequate for
//! the box constraints used by the engine.

/// Outcome of a minimization run.
#[derive(Debug, Clone)]
pub struct Minimization {
    /// Best point found.
    pub point: Vec<f64>,
    /// Objective value at `point`.
    pub value: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// True when the simplex spread fell below the tolerance.
    pub converged: bool,
}

// Standard simplex coefficients.
const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Relative step used to spread the initial simplex around the start point.
const INITIAL_STEP: f64 = 0.1;

/// Minimize `objective` over the box given by `bounds`.
///
/// `bounds` must have one (low, high) pair per dimension of `start`.
pub fn minimize<F>(
    objective: F,
    start: &[f64],
    bounds: &[(f64, f64)],
    max_iter: usize,
    tolerance: f64,
) -> Minimization
where
    F: Fn(&[f64]) -> f64,
{
    let n = start.len();
    debug_assert_eq!(bounds.len(), n);

    if n == 0 {
        return Minimization {
            point: vec![],
            value: objective(&[]),
            iterations: 0,
            converged: true,
        };
    }

    let clamp = |mut point: Vec<f64>| -> Vec<f64> {
        for (v, &(lo, hi)) in point.iter_mut().zip(bounds) {
            *v = v.clamp(lo, hi);
        }
        point
    };

    // Simplex vertices stored as (value, point), kept sorted best-first.
    let mut simplex: Vec<(f64, Vec<f64>)> = Vec::with_capacity(n + 1);
    let origin = clamp(start.to_vec());
    simplex.push((objective(&origin), origin.clone()));
    for i in 0..n {
        let mut vertex = origin.clone();
        let step = if vertex[i].abs() > 1e-10 {
            INITIAL_STEP * vertex[i].abs()
        } else {
            INITIAL_STEP
        };
        vertex[i] += step;
        let vertex = clamp(vertex);
        simplex.push((objective(&vertex), vertex));
    }

    let sort = |simplex: &mut Vec<(f64, Vec<f64>)>| {
        simplex.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    };

    let mut iterations = 0;
    let mut converged = false;

    while iterations < max_iter {
        iterations += 1;
        sort(&mut simplex);

        let spread = simplex[n].0 - simplex[0].0;
        if spread.abs() < tolerance {
            converged = true;
            break;
        }

        // Centroid of all vertices except the worst.
        let mut centroid = vec![0.0; n];
        for (_, vertex) in &simplex[..n] {
            for (c, v) in centroid.iter_mut().zip(vertex) {
                *c += v;
            }
        }
        for c in &mut centroid {
            *c /= n as f64;
        }

        let (worst_value, worst_point) = simplex[n].clone();

        let reflected = clamp(
            centroid
                .iter()
                .zip(&worst_point)
                .map(|(c, w)| c + REFLECT * (c - w))
                .collect(),
        );
        let reflected_value = objective(&reflected);

        if reflected_value < simplex[0].0 {
            let expanded = clamp(
                centroid
                    .iter()
                    .zip(&reflected)
                    .map(|(c, r)| c + EXPAND * (r - c))
                    .collect(),
            );
            let expanded_value = objective(&expanded);
            simplex[n] = if expanded_value < reflected_value {
                (expanded_value, expanded)
            } else {
                (reflected_value, reflected)
            };
            continue;
        }

        if reflected_value < simplex[n - 1].0 {
            simplex[n] = (reflected_value, reflected);
            continue;
        }

        // Contract toward the better of the worst vertex and its reflection.
        let (target_value, target) = if reflected_value < worst_value {
            (reflected_value, &reflected)
        } else {
            (worst_value, &worst_point)
        };
        let contracted = clamp(
            centroid
                .iter()
                .zip(target)
                .map(|(c, t)| c + CONTRACT * (t - c))
                .collect(),
        );
        let contracted_value = objective(&contracted);
        if contracted_value < target_value {
            simplex[n] = (contracted_value, contracted);
            continue;
        }

        // Shrink every vertex toward the best one.
        let best = simplex[0].1.clone();
        for entry in simplex.iter_mut().skip(1) {
            let moved = best
                .iter()
                .zip(&entry.1)
                .map(|(b, v)| b + SHRINK * (v - b))
                .collect();
            let moved = clamp(moved);
            *entry = (objective(&moved), moved);
        }
    }

    sort(&mut simplex);
    let (value, point) = simplex.swap_remove(0);
    Minimization {
        point,
        value,
        iterations,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const WIDE: (f64, f64) = (-100.0, 100.0);

    #[test]
    fn finds_quadratic_minimum_in_two_dimensions() {
        let result = minimize(
            |x| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2),
            &[0.0, 0.0],
            &[WIDE, WIDE],
            1000,
            1e-10,
        );

        assert!(result.converged);
        assert_relative_eq!(result.point[0], 2.0, epsilon = 1e-4);
        assert_relative_eq!(result.point[1], 3.0, epsilon = 1e-4);
    }

    #[test]
    fn respects_box_bounds() {
        // Unconstrained minimum at x = 5; box stops at 3.
        let result = minimize(|x| (x[0] - 5.0).powi(2), &[1.0], &[(0.0, 3.0)], 1000, 1e-12);
        assert_relative_eq!(result.point[0], 3.0, epsilon = 1e-6);
    }

    #[test]
    fn handles_start_at_minimum() {
        let result = minimize(|x| (x[0] - 2.0).powi(2), &[2.0], &[WIDE], 500, 1e-10);
        assert!(result.converged);
        assert_relative_eq!(result.point[0], 2.0, epsilon = 1e-4);
    }

    #[test]
    fn empty_start_returns_immediately() {
        let result = minimize(|_| 4.5, &[], &[], 100, 1e-8);
        assert!(result.converged);
        assert!(result.point.is_empty());
        assert_relative_eq!(result.value, 4.5);
    }

    #[test]
    fn rosenbrock_valley_is_tracked() {
        let result = minimize(
            |x| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0].powi(2)).powi(2),
            &[-1.0, 1.0],
            &[WIDE, WIDE],
            5000,
            1e-12,
        );
        assert_relative_eq!(result.point[0], 1.0, epsilon = 1e-2);
        assert_relative_eq!(result.point[1], 1.0, epsilon = 1e-2);
    }
}
