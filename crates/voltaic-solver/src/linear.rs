//! Dense linear solver.

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};

/// A pivot below this magnitude, after the row search, means singular.
pub const PIVOT_THRESHOLD: f64 = 1e-15;

/// Solve `A x = z` by Gauss-Jordan elimination with partial pivoting.
///
/// Works on copies; the inputs are untouched. Fails with
/// [`Error::SingularMatrix`] when no column pivot reaches
/// [`PIVOT_THRESHOLD`], and with [`Error::DimensionMismatch`] on
/// non-square or mismatched inputs.
pub fn solve_dense(a: &DMatrix<f64>, z: &DVector<f64>) -> Result<DVector<f64>> {
    if a.nrows() != a.ncols() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: a.ncols(),
        });
    }
    if a.nrows() != z.len() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: z.len(),
        });
    }

    let n = a.nrows();
    let mut m = a.clone_owned();
    let mut x = z.clone_owned();

    for col in 0..n {
        // Partial pivoting: largest magnitude in the column at or below
        // the diagonal.
        let mut pivot_row = col;
        let mut pivot_mag = m[(col, col)].abs();
        for row in (col + 1)..n {
            let mag = m[(row, col)].abs();
            if mag > pivot_mag {
                pivot_row = row;
                pivot_mag = mag;
            }
        }
        if pivot_mag < PIVOT_THRESHOLD {
            return Err(Error::SingularMatrix);
        }
        if pivot_row != col {
            m.swap_rows(col, pivot_row);
            x.swap_rows(col, pivot_row);
        }

        let pivot = m[(col, col)];
        for j in col..n {
            m[(col, j)] /= pivot;
        }
        x[col] /= pivot;

        // Jordan step: clear the column everywhere else.
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = m[(row, col)];
            if factor == 0.0 {
                continue;
            }
            for j in col..n {
                m[(row, j)] -= factor * m[(col, j)];
            }
            x[row] -= factor * x[col];
        }
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{dmatrix, dvector};

    #[test]
    fn test_solve_simple() {
        // 2x + y = 5, x + 3y = 6
        let a = dmatrix![2.0, 1.0; 1.0, 3.0];
        let z = dvector![5.0, 6.0];

        let x = solve_dense(&a, &z).unwrap();
        assert!((x[0] - 1.8).abs() < 1e-12);
        assert!((x[1] - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_pivoting_handles_zero_diagonal() {
        // Leading zero forces a row swap before elimination.
        let a = dmatrix![0.0, 1.0; 1.0, 0.0];
        let z = dvector![3.0, 7.0];

        let x = solve_dense(&a, &z).unwrap();
        assert!((x[0] - 7.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_singular_matrix() {
        let a = dmatrix![1.0, 2.0; 2.0, 4.0];
        let z = dvector![1.0, 2.0];
        assert!(matches!(solve_dense(&a, &z), Err(Error::SingularMatrix)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = dmatrix![1.0, 2.0; 3.0, 4.0];
        let z = dvector![1.0, 2.0, 3.0];
        assert!(matches!(
            solve_dense(&a, &z),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_system() {
        let a = DMatrix::<f64>::zeros(0, 0);
        let z = DVector::<f64>::zeros(0);
        assert_eq!(solve_dense(&a, &z).unwrap().len(), 0);
    }

    #[test]
    fn test_three_by_three() {
        let a = dmatrix![
            2.0, -1.0, 0.0;
            -1.0, 2.0, -1.0;
            0.0, -1.0, 2.0
        ];
        let z = dvector![1.0, 0.0, 1.0];

        let x = solve_dense(&a, &z).unwrap();
        let check = &a * &x;
        for i in 0..3 {
            assert!((check[i] - z[i]).abs() < 1e-12);
        }
    }
}
