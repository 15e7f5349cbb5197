//! Dense Gaussian elimination with partial pivoting.
//!
//! The system is solved on the augmented matrix `[A | b]`: forward
//! elimination to upper-triangular form, then back substitution. Pivots are
//! chosen by absolute magnitude only (no scaling).

use crate::error::{NodalError, Result};

use super::mna::MnaMatrix;

/// Solve an assembled MNA system.
///
/// `pivot_tolerance` is the largest pivot magnitude still treated as zero;
/// `0.0` means only an exactly-zero column is singular. A zero pivot is
/// singular even when the tolerance is negative or NaN.
pub fn solve_system(matrix: &MnaMatrix, pivot_tolerance: f64) -> Result<Vec<f64>> {
    solve_augmented(matrix.augmented(), pivot_tolerance)
}

/// Solve `A x = b` given the augmented matrix `m` (`n` rows of `n + 1`).
pub fn solve_augmented(mut m: Vec<Vec<f64>>, pivot_tolerance: f64) -> Result<Vec<f64>> {
    let n = m.len();
    debug_assert!(m.iter().all(|row| row.len() == n + 1));

    for k in 0..n {
        // Find pivot
        let mut max_row = k;
        let mut max_val = m[k][k].abs();
        for (i, row) in m.iter().enumerate().skip(k + 1) {
            let val = row[k].abs();
            if val > max_val {
                max_val = val;
                max_row = i;
            }
        }

        // An all-zero column is singular whatever the tolerance says
        if max_val.is_nan() || max_val == 0.0 || max_val <= pivot_tolerance {
            log::warn!("singular system: no usable pivot in column {} of {}", k, n);
            return Err(NodalError::SingularMatrix { column: k });
        }
        log::trace!("column {}: pivot row {} (|{:e}|)", k, max_row, max_val);

        if max_row != k {
            m.swap(k, max_row);
        }

        // Eliminate below the pivot, RHS column included
        let (upper, lower) = m.split_at_mut(k + 1);
        let pivot_row = &upper[k];
        for row in lower.iter_mut() {
            let factor = row[k] / pivot_row[k];
            for j in k..=n {
                row[j] -= factor * pivot_row[j];
            }
        }
    }

    // Back substitution
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut s = m[i][n];
        for j in (i + 1)..n {
            s -= m[i][j] * x[j];
        }
        x[i] = s / m[i][i];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solve_2x2() {
        // 2x + y = 5, x + 3y = 10
        let x = solve_augmented(vec![vec![2.0, 1.0, 5.0], vec![1.0, 3.0, 10.0]], 0.0).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_requires_row_swap() {
        // Zero on the leading diagonal forces a pivot swap
        let x = solve_augmented(vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 7.0]], 0.0).unwrap();
        assert_eq!(x, vec![7.0, 2.0]);
    }

    #[test]
    fn test_solve_3x3() {
        let m = vec![
            vec![2.0, 1.0, -1.0, 8.0],
            vec![-3.0, -1.0, 2.0, -11.0],
            vec![-2.0, 1.0, 2.0, -3.0],
        ];
        let x = solve_augmented(m, 0.0).unwrap();
        assert_relative_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
        assert_relative_eq!(x[2], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_reports_column() {
        // Second row is a multiple of the first
        let err = solve_augmented(vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]], 0.0).unwrap_err();
        assert!(matches!(err, NodalError::SingularMatrix { column: 1 }));
    }

    #[test]
    fn test_zero_column_is_singular() {
        let err = solve_augmented(vec![vec![0.0, 1.0, 1.0], vec![0.0, 1.0, 1.0]], 0.0).unwrap_err();
        assert!(matches!(err, NodalError::SingularMatrix { column: 0 }));
    }

    #[test]
    fn test_pivot_tolerance() {
        let m = vec![vec![1e-20, 0.0, 1.0], vec![0.0, 1.0, 1.0]];
        assert!(solve_augmented(m.clone(), 0.0).is_ok());
        assert!(matches!(
            solve_augmented(m, 1e-15),
            Err(NodalError::SingularMatrix { column: 0 })
        ));
    }

    #[test]
    fn test_zero_pivot_ignores_degenerate_tolerance() {
        let m = vec![vec![0.0, 1.0, 1.0], vec![0.0, 1.0, 1.0]];
        for tol in [-1.0, f64::NAN, f64::NEG_INFINITY] {
            assert!(matches!(
                solve_augmented(m.clone(), tol),
                Err(NodalError::SingularMatrix { column: 0 })
            ));
        }
    }

    #[test]
    fn test_empty_system() {
        assert!(solve_augmented(Vec::new(), 0.0).unwrap().is_empty());
    }
}
