//! LU factorization with partial (row) pivoting.
use nalgebra::{
    allocator::Allocator, ComplexField, DefaultAllocator, Dim, Matrix, OMatrix, Scalar, Storage,
};

use crate::{check_square, Error};

/// The factors of `P A = L U`.
#[derive(Clone, Debug, PartialEq)]
pub struct PivotedLu<T, R, C>
where
    T: Scalar,
    R: Dim,
    C: Dim,
    DefaultAllocator: Allocator<T, R, C>,
{
    /// Permutation matrix, every row and column holds a single one.
    pub p: OMatrix<T, R, C>,
    /// Unit lower triangular factor.
    pub l: OMatrix<T, R, C>,
    /// Upper triangular factor.
    pub u: OMatrix<T, R, C>,
    /// `row_order[i]` is the row of A that ended up in row i of `P A`.
    row_order: Vec<usize>,
}

impl<T, R, C> PivotedLu<T, R, C>
where
    T: Scalar,
    R: Dim,
    C: Dim,
    DefaultAllocator: Allocator<T, R, C>,
{
    /// Compact form of `P`: `P A` is A with its rows taken in this order.
    pub fn row_order(&self) -> &[usize] {
        &self.row_order
    }

    pub fn into_parts(self) -> (OMatrix<T, R, C>, OMatrix<T, R, C>, OMatrix<T, R, C>) {
        (self.p, self.l, self.u)
    }
}

/// Performs the LU factorization of the N by N dense matrix A with partial (row) pivoting, such
/// that `P A = L U`.
///
/// At the beginning of elimination step k, the row among k, ..., N-1 holding the largest magnitude
/// entry in column k of the working copy of U is chosen as the pivot row (first occurrence on
/// ties). It is exchanged with row k in U, in the row order of P, and in the already computed
/// columns 0..k of L. Then every row i below k is eliminated:
///
/// ```math
/// L[i, k] = U[i, k] / U[k, k]
/// U[i, :] -= L[i, k] * U[k, :]
/// ```
///
/// Finally the diagonal of L is set to one.
///
/// returns [`Error::Singular`] with the column index if every candidate pivot in some column is
/// exactly zero.
pub fn lu_factorize_pivoted<T, R, C, S>(
    mat_a: &Matrix<T, R, C, S>,
) -> Result<PivotedLu<T, R, C>, Error>
where
    T: ComplexField + Copy,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
    DefaultAllocator: Allocator<T, R, C>,
{
    let n = check_square(mat_a)?;
    log::trace!("lu_factorize_pivoted(n={})", n);

    let (nrows, ncols) = mat_a.shape_generic();
    let mut mat_u = mat_a.clone_owned();
    let mut mat_l = OMatrix::<T, R, C>::zeros_generic(nrows, ncols);
    let mut row_order: Vec<usize> = (0..n).collect();

    // k-th elimination step number
    for k in 0..n {
        // find l = pivot row number
        let mut l = k;
        let mut max = mat_u[(k, k)].modulus();
        for i in (k + 1)..n {
            let candidate = mat_u[(i, k)].modulus();
            if candidate > max {
                max = candidate;
                l = i;
            }
        }

        // check for zero pivot element
        if mat_u[(l, k)].is_zero() {
            log::debug!("singular matrix, zero pivot column {}", k);
            return Err(Error::Singular { col: k });
        }

        // swap rows k and l of U, of P, and of the completed columns of L
        if l != k {
            log::debug!("step {}: exchanging rows {} and {}", k, k, l);
            mat_u.swap_rows(k, l);
            row_order.swap(k, l);
            for j in 0..k {
                mat_l.swap((k, j), (l, j));
            }
        }

        // row_i = row_i - [u(i,k)/u(k,k)] row_k, i=k+1, ..., n-1
        let pivot = mat_u[(k, k)];
        for i in (k + 1)..n {
            let l_ik = mat_u[(i, k)] / pivot;
            mat_l[(i, k)] = l_ik;

            mat_u[(i, k)] = T::zero();
            if l_ik.is_zero() {
                continue;
            }
            for j in (k + 1)..n {
                let u_kj = mat_u[(k, j)];
                mat_u[(i, j)] -= l_ik * u_kj;
            }
        }
    }

    mat_l.fill_diagonal(T::one());

    let mut mat_p = OMatrix::<T, R, C>::zeros_generic(nrows, ncols);
    for (i, &row) in row_order.iter().enumerate() {
        mat_p[(i, row)] = T::one();
    }

    Ok(PivotedLu {
        p: mat_p,
        l: mat_l,
        u: mat_u,
        row_order,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{dmatrix, matrix, DMatrix};

    use super::*;

    #[test]
    fn test_lu_factorize_pivoted1() {
        let mat_a = matrix![
            2.0, -1.0, 3.0;
            4.0, 2.0, 1.0;
            -2.0, 1.0, 2.0;
        ];

        let lu = lu_factorize_pivoted(&mat_a).unwrap();

        assert_eq!(lu.row_order(), &[1, 0, 2]);
        assert_eq!(
            lu.p,
            matrix![
                0.0, 1.0, 0.0;
                1.0, 0.0, 0.0;
                0.0, 0.0, 1.0;
            ]
        );
        assert_relative_eq!(
            lu.l,
            matrix![
                1.0, 0.0, 0.0;
                0.5, 1.0, 0.0;
                -0.5, -1.0, 1.0;
            ],
            epsilon = 1e-14
        );
        assert_relative_eq!(
            lu.u,
            matrix![
                4.0, 2.0, 1.0;
                0.0, -2.0, 2.5;
                0.0, 0.0, 5.0;
            ],
            epsilon = 1e-14
        );
        assert_relative_eq!(lu.p * mat_a, lu.l * lu.u, epsilon = 1e-12);
    }

    #[test]
    fn test_swaps_completed_l_columns() {
        // the second step exchanges rows 1 and 2, which carries the multipliers of step 0 along
        let mat_a = matrix![
            4.0, 8.0, 2.0;
            2.0, 1.0, 1.0;
            1.0, 7.0, 3.0;
        ];

        let lu = lu_factorize_pivoted(&mat_a).unwrap();

        assert_eq!(lu.row_order(), &[0, 2, 1]);
        assert_relative_eq!(
            lu.l,
            matrix![
                1.0, 0.0, 0.0;
                0.25, 1.0, 0.0;
                0.5, -0.6, 1.0;
            ],
            epsilon = 1e-14
        );
        assert_relative_eq!(
            lu.u,
            matrix![
                4.0, 8.0, 2.0;
                0.0, 5.0, 2.5;
                0.0, 0.0, 1.5;
            ],
            epsilon = 1e-14
        );
        assert_relative_eq!(lu.p * mat_a, lu.l * lu.u, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_leading_minor() {
        // the unpivoted factorization fails on this one
        let mat_a = matrix![
            0.0, 1.0;
            1.0, 0.0;
        ];
        let (mat_p, mat_l, mat_u) = lu_factorize_pivoted(&mat_a).unwrap().into_parts();
        assert_eq!(mat_l, matrix![1.0, 0.0; 0.0, 1.0]);
        assert_eq!(mat_u, matrix![1.0, 0.0; 0.0, 1.0]);
        assert_eq!(mat_p * mat_a, mat_u);
    }

    #[test]
    fn test_permutation_matrix() {
        let n = 7;
        // dominated by the anti-diagonal, so most steps exchange rows
        let mat_a = DMatrix::from_fn(n, n, |i, j| {
            let f = ((i * 5 + j * 11) % 13) as f64 - 6.0;
            if i + j == n - 1 {
                f + 50.0
            } else {
                f
            }
        });

        let lu = lu_factorize_pivoted(&mat_a).unwrap();

        for i in 0..n {
            assert_eq!(lu.p.row(i).sum(), 1.0);
            assert_eq!(lu.p.column(i).sum(), 1.0);
        }
        assert_eq!(&lu.p * lu.p.transpose(), DMatrix::identity(n, n));
        assert_relative_eq!(&lu.p * &mat_a, &lu.l * &lu.u, epsilon = 1e-10);

        // |L[i, j]| <= 1 under partial pivoting
        assert!(lu.l.iter().all(|l_ij| l_ij.abs() <= 1.0));
    }

    #[test]
    fn test_pivot_tie_keeps_first_row() {
        // |1| == |-1| in the first column
        let mat_a = matrix![
            1.0, 2.0;
            -1.0, 3.0;
        ];

        let lu = lu_factorize_pivoted(&mat_a).unwrap();

        assert_eq!(lu.row_order(), &[0, 1]);
        assert_eq!(lu.p, matrix![1.0, 0.0; 0.0, 1.0]);
        assert_eq!(lu.l, matrix![1.0, 0.0; -1.0, 1.0]);
        assert_eq!(lu.u, matrix![1.0, 2.0; 0.0, 5.0]);
    }

    #[test]
    fn test_singular() {
        let mat_a = matrix![
            1.0, 0.0, 2.0;
            3.0, 0.0, 4.0;
            5.0, 0.0, 6.0;
        ];
        assert_eq!(
            lu_factorize_pivoted(&mat_a),
            Err(Error::Singular { col: 1 })
        );

        assert_eq!(
            lu_factorize_pivoted(&DMatrix::<f64>::zeros(3, 3)),
            Err(Error::Singular { col: 0 })
        );
    }

    #[test]
    fn test_not_square() {
        let mat_a = dmatrix![1.0, 2.0; 3.0, 4.0; 5.0, 6.0];
        assert_eq!(
            lu_factorize_pivoted(&mat_a),
            Err(Error::NotSquare { nrows: 3, ncols: 2 })
        );
    }
}
