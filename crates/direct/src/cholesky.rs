//! Cholesky factorization of Hermitian (symmetric, for real scalars) positive-definite matrices.
use nalgebra::{allocator::Allocator, ComplexField, DefaultAllocator, Dim, Matrix, OMatrix, Storage};

use crate::{check_square, Error, Tolerance};

/// Computes the lower triangular `L` such that `A = L Lᴴ`.
///
/// The factorization only proceeds if A is self-adjoint: every `A[i, j]` must be close to
/// `conj(A[j, i])` with respect to `tol`, otherwise [`Error::NotHermitian`] is returned before
/// any numeric work is done.
///
/// Column k of L is then built from the Schur complement pivot
///
/// ```math
/// d = A[k, k] - L[k, :k] . conj(L[k, :k])
/// L[k, k] = sqrt(d)
/// L[i, k] = (A[i, k] - L[i, :k] . conj(L[k, :k])) / L[k, k],  i > k
/// ```
///
/// Positive-definiteness is verified one pivot at a time: if the real part of `d` is not greater
/// than `tol.atol`, [`Error::NotPositiveDefinite`] reports the pivot index and that real part.
///
/// Real and complex scalars share this code path, conjugation being the identity for the former.
pub fn cholesky<T, R, C, S>(
    mat_a: &Matrix<T, R, C, S>,
    tol: &Tolerance<T::RealField>,
) -> Result<OMatrix<T, R, C>, Error>
where
    T: ComplexField + Copy,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
    DefaultAllocator: Allocator<T, R, C>,
{
    let n = check_square(mat_a)?;
    check_hermitian(mat_a, tol)?;

    log::trace!("cholesky(n={})", n);

    let (nrows, ncols) = mat_a.shape_generic();
    let mut mat_l = OMatrix::<T, R, C>::zeros_generic(nrows, ncols);

    for k in 0..n {
        let d = mat_a[(k, k)] - conj_dot(&mat_l, k, k, k);
        if !tol.is_positive(&d.real()) {
            let value = nalgebra::try_convert::<_, f64>(d.real()).unwrap_or(f64::NAN);
            log::debug!("not positive definite at pivot {}: got {:?}", k, d);
            return Err(Error::NotPositiveDefinite { pivot: k, value });
        }

        let l_kk = d.sqrt();
        mat_l[(k, k)] = l_kk;

        for i in (k + 1)..n {
            mat_l[(i, k)] = (mat_a[(i, k)] - conj_dot(&mat_l, i, k, k)) / l_kk;
        }
    }

    Ok(mat_l)
}

/// `sum_j L[a, j] * conj(L[b, j])` over the first `len` columns.
fn conj_dot<T, R, C, S>(mat_l: &Matrix<T, R, C, S>, a: usize, b: usize, len: usize) -> T
where
    T: ComplexField + Copy,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
{
    (0..len).fold(T::zero(), |acc, j| {
        acc + mat_l[(a, j)] * mat_l[(b, j)].conjugate()
    })
}

fn check_hermitian<T, R, C, S>(
    mat_a: &Matrix<T, R, C, S>,
    tol: &Tolerance<T::RealField>,
) -> Result<(), Error>
where
    T: ComplexField + Copy,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
{
    let n = mat_a.nrows();
    for row in 0..n {
        for col in row..n {
            if !tol.is_close(mat_a[(row, col)], mat_a[(col, row)].conjugate()) {
                log::debug!("entry ({}, {}) breaks self-adjointness", row, col);
                return Err(Error::NotHermitian { row, col });
            }
        }
    }
    Ok(())
}
