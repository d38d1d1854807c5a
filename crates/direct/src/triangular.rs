use nalgebra::{
    allocator::Allocator, ComplexField, DefaultAllocator, Dim, Matrix, OVector, Storage, U1,
};

use crate::{check_square, Error, Tolerance};

/// Solves `U x = b` for `x`, where `U` is an upper triangular matrix.
///
/// `U` must be square, `b` must have as many entries as `U` has rows, and every entry strictly
/// below the diagonal of `U` must be negligible with respect to `tol`. The lower part is never
/// silently ignored: a non-triangular `U` is rejected with [`Error::NotUpperTriangular`].
///
/// The rows are processed from last to first in a single backward sweep,
///
/// ```math
/// x[i] = (b[i] - U[i, i+1:] . x[i+1:]) / U[i, i]
/// ```
///
/// returns [`Error::ZeroDiagonal`] with the offending row if some `U[i, i]` is exactly zero.
pub fn back_substitution<T, R, C, SA, SB>(
    mat_u: &Matrix<T, R, C, SA>,
    b: &Matrix<T, R, U1, SB>,
    tol: &Tolerance<T::RealField>,
) -> Result<OVector<T, R>, Error>
where
    T: ComplexField + Copy,
    R: Dim,
    C: Dim,
    SA: Storage<T, R, C>,
    SB: Storage<T, R>,
    DefaultAllocator: Allocator<T, R>,
{
    let n = check_square(mat_u)?;
    if b.nrows() != n {
        log::debug!("rejecting rhs of size {} for a {}x{} system", b.nrows(), n, n);
        return Err(Error::DimensionMismatch {
            dim: n,
            len: b.nrows(),
        });
    }
    check_upper_triangular(mat_u, tol)?;

    log::trace!("back_substitution(n={})", n);

    let mut x = OVector::<T, R>::zeros_generic(mat_u.shape_generic().0, U1);
    for i in (0..n).rev() {
        let u_ii = mat_u[(i, i)];
        if u_ii.is_zero() {
            log::debug!("zero diagonal element at row {}", i);
            return Err(Error::ZeroDiagonal { row: i });
        }

        let sum = ((i + 1)..n).fold(T::zero(), |acc, j| acc + mat_u[(i, j)] * x[j]);
        x[i] = (b[i] - sum) / u_ii;
    }

    Ok(x)
}

/// Finds the first entry (in column-major order) strictly below the diagonal that is not negligible.
fn check_upper_triangular<T, R, C, S>(
    mat_u: &Matrix<T, R, C, S>,
    tol: &Tolerance<T::RealField>,
) -> Result<(), Error>
where
    T: ComplexField + Copy,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
{
    let n = mat_u.ncols();
    for col in 0..n {
        for row in (col + 1)..n {
            if !tol.is_negligible(mat_u[(row, col)]) {
                log::debug!("entry ({}, {}) is below the diagonal", row, col);
                return Err(Error::NotUpperTriangular { row, col });
            }
        }
    }
    Ok(())
}
