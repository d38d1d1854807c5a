//! LU factorization without pivoting, using outer-product Gaussian elimination.
use nalgebra::{allocator::Allocator, ComplexField, DefaultAllocator, Dim, Matrix, OMatrix, Storage};

use crate::{check_square, Error};

/// Performs the LU factorization of the N by N dense matrix A without row exchanges.
///
/// A successful factorization returns a packed matrix holding both factors:
///
/// 1. The upper triangular part (including its diagonal) contains U.
///
/// 2. The strictly lower triangular part contains the multipliers of L. The unit diagonal of L is
///     implied and not stored.
///
/// Each of the N-1 elimination steps k computes the multipliers `a(i,k)/a(k,k)` for the rows below
/// k, stores them in column k, and applies the rank-one update
/// `A[k+1:, k+1:] -= outer(A[k+1:, k], A[k, k+1:])` to the trailing submatrix.
///
/// `mat_a` is not modified. Since no pivoting is available, every leading principal minor must be
/// nonzero: an exactly zero pivot at step k returns [`Error::ZeroPivot`] with `row = k`, even
/// when the matrix itself is nonsingular.
pub fn lu_factorize<T, R, C, S>(mat_a: &Matrix<T, R, C, S>) -> Result<OMatrix<T, R, C>, Error>
where
    T: ComplexField + Copy,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
    DefaultAllocator: Allocator<T, R, C>,
{
    let n = check_square(mat_a)?;
    log::trace!("lu_factorize(n={})", n);

    let mut lu = mat_a.clone_owned();

    // k-th elimination step number
    for k in 0..n.saturating_sub(1) {
        let pivot = lu[(k, k)];
        if pivot.is_zero() {
            log::debug!("zero pivot at row {}", k);
            return Err(Error::ZeroPivot { row: k });
        }

        let m = n - k - 1;

        // multipliers l(i,k) = a(i,k)/a(k,k), i=k+1, ..., n-1
        for l_ik in lu.view_mut((k + 1, k), (m, 1)).iter_mut() {
            *l_ik /= pivot;
        }

        // a(k+1:, k+1:) -= l(k+1:, k) * a(k, k+1:)
        let multipliers = lu.column(k).rows(k + 1, m).clone_owned();
        let pivot_row = lu.row(k).columns(k + 1, m).transpose();
        lu.view_mut((k + 1, k + 1), (m, m))
            .ger(-T::one(), &multipliers, &pivot_row, T::one());
    }

    Ok(lu)
}

/// Splits a packed LU matrix into its unit lower triangular factor `L` and upper triangular
/// factor `U`.
pub fn extract_lu<T, R, C, S>(
    packed: &Matrix<T, R, C, S>,
) -> Result<(OMatrix<T, R, C>, OMatrix<T, R, C>), Error>
where
    T: ComplexField + Copy,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
    DefaultAllocator: Allocator<T, R, C>,
{
    check_square(packed)?;

    let mut mat_l = packed.clone_owned();
    mat_l.fill_upper_triangle(T::zero(), 1);
    mat_l.fill_diagonal(T::one());

    let mut mat_u = packed.clone_owned();
    mat_u.fill_lower_triangle(T::zero(), 1);

    Ok((mat_l, mat_u))
}
