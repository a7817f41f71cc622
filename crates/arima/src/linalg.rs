//! Dense linear algebra for the least-squares estimators.
//!
//! Both the AR and the MA estimator reduce to a small ridge-regularised
//! normal-equation system `(X'X + λI) β = X'y`, accumulated row by row and
//! solved with Gaussian elimination.

use ndarray::{Array1, Array2};

/// Pivots with an absolute value below this threshold mark a singular row.
pub const PIVOT_EPSILON: f64 = 1e-12;

/// Solves the square system `a · x = b` by Gaussian elimination with
/// partial pivoting.
///
/// At each column the row with the largest absolute entry is swapped into
/// the pivot position. If that pivot is still below [`PIVOT_EPSILON`] the
/// row is treated as singular: it is not used for elimination and its
/// unknown resolves to `0` during back-substitution. Singular systems never
/// panic.
///
/// # Example
///
/// ```
/// use fincast_arima::solve_linear_system;
/// use ndarray::array;
///
/// let x = solve_linear_system(array![[2.0, 1.0], [1.0, 3.0]], array![3.0, 5.0]);
/// assert!((x[0] - 0.8).abs() < 1e-12);
/// assert!((x[1] - 1.4).abs() < 1e-12);
/// ```
pub fn solve_linear_system(mut a: Array2<f64>, mut b: Array1<f64>) -> Array1<f64> {
    let n = b.len();
    debug_assert_eq!(a.dim(), (n, n), "coefficient matrix must be n x n");

    // Forward elimination
    for col in 0..n {
        let mut pivot_row = col;
        let mut pivot_abs = a[[col, col]].abs();
        for row in (col + 1)..n {
            let candidate = a[[row, col]].abs();
            if candidate > pivot_abs {
                pivot_abs = candidate;
                pivot_row = row;
            }
        }
        if pivot_row != col {
            for c in 0..n {
                a.swap([col, c], [pivot_row, c]);
            }
            b.swap(col, pivot_row);
        }

        let pivot = a[[col, col]];
        if pivot.abs() < PIVOT_EPSILON {
            continue;
        }
        for row in (col + 1)..n {
            let factor = a[[row, col]] / pivot;
            if factor == 0.0 {
                continue;
            }
            for c in col..n {
                let upper = a[[col, c]];
                a[[row, c]] -= factor * upper;
            }
            let upper_b = b[col];
            b[row] -= factor * upper_b;
        }
    }

    // Back substitution
    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let pivot = a[[row, row]];
        if pivot.abs() < PIVOT_EPSILON {
            continue;
        }
        let mut sum = b[row];
        for c in (row + 1)..n {
            sum -= a[[row, c]] * x[c];
        }
        x[row] = sum / pivot;
    }
    x
}

/// Accumulator for the normal equations `X'X β = X'y`.
///
/// Rows are added one at a time by explicit summation; nothing ever
/// materialises the full design matrix.
#[derive(Clone, Debug)]
pub(crate) struct NormalEquations {
    xtx: Array2<f64>,
    xty: Array1<f64>,
}

impl NormalEquations {
    /// Creates an empty system with `dim` unknowns.
    pub(crate) fn new(dim: usize) -> Self {
        Self {
            xtx: Array2::zeros((dim, dim)),
            xty: Array1::zeros(dim),
        }
    }

    /// Adds one design row `x` with target `y`.
    pub(crate) fn add_row(&mut self, x: &[f64], y: f64) {
        let dim = self.xty.len();
        debug_assert_eq!(x.len(), dim);
        for r in 0..dim {
            self.xty[r] += x[r] * y;
            for c in 0..dim {
                self.xtx[[r, c]] += x[r] * x[c];
            }
        }
    }

    /// Adds `ridge` to every diagonal entry and solves the system.
    pub(crate) fn solve(mut self, ridge: f64) -> Array1<f64> {
        for k in 0..self.xty.len() {
            self.xtx[[k, k]] += ridge;
        }
        solve_linear_system(self.xtx, self.xty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn solves_two_by_two() {
        let x = solve_linear_system(array![[2.0, 1.0], [1.0, 3.0]], array![3.0, 5.0]);
        assert_abs_diff_eq!(x[0], 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 1.4, epsilon = 1e-12);
    }

    #[test]
    fn pivots_past_zero_diagonal() {
        let x = solve_linear_system(array![[0.0, 1.0], [1.0, 0.0]], array![2.0, 3.0]);
        assert_abs_diff_eq!(x[0], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn solves_three_by_three() {
        // x = [1, -2, 3]
        let a = array![[4.0, -2.0, 1.0], [-2.0, 4.0, -2.0], [1.0, -2.0, 4.0]];
        let b = array![11.0, -16.0, 17.0];
        let x = solve_linear_system(a, b);
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(x[1], -2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(x[2], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn singular_row_resolves_to_zero() {
        // Second row is twice the first: elimination zeroes it out.
        let x = solve_linear_system(array![[1.0, 2.0], [2.0, 4.0]], array![3.0, 6.0]);
        assert_abs_diff_eq!(x[1], 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(x[0], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_matrix_gives_zero_solution() {
        let x = solve_linear_system(Array2::zeros((3, 3)), array![1.0, 2.0, 3.0]);
        assert!(x.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn empty_system() {
        let x = solve_linear_system(Array2::zeros((0, 0)), Array1::zeros(0));
        assert!(x.is_empty());
    }

    #[test]
    fn normal_equations_recover_line() {
        // y = 1 + 2x, exact
        let mut ne = NormalEquations::new(2);
        for i in 0..10 {
            let x = i as f64;
            ne.add_row(&[1.0, x], 1.0 + 2.0 * x);
        }
        let beta = ne.solve(1e-8);
        assert_abs_diff_eq!(beta[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(beta[1], 2.0, epsilon = 1e-6);
    }

    #[test]
    fn normal_equations_without_rows_solve_to_zero() {
        let beta = NormalEquations::new(3).solve(1e-6);
        assert!(beta.iter().all(|&v| v == 0.0));
    }
}
