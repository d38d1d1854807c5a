//! Dense direct solver kernels for square matrices.
//!
//! * [`back_substitution`] solves `U x = b` for an upper-triangular `U`.
//! * [`lu_factorize`] performs outer-product Gaussian elimination without pivoting, returning the
//!     packed `L\U` matrix ([`extract_lu`] splits it back into its factors).
//! * [`lu_factorize_pivoted`] performs Gaussian elimination with partial (row) pivoting, returning
//!     `P A = L U` as separate matrices.
//! * [`cholesky`] factors a Hermitian positive-definite matrix as `A = L Lᴴ`.
//!
//! Every kernel takes its input by reference and returns freshly allocated factors. Composing them
//! (e.g. forward then back substitution) is left to the caller.
use nalgebra::{Dim, Matrix, Scalar, Storage};
use thiserror::Error;

mod cholesky;
mod lu;
mod lu_pivoted;
mod tolerance;
mod triangular;

pub use cholesky::cholesky;
pub use lu::{extract_lu, lu_factorize};
pub use lu_pivoted::{lu_factorize_pivoted, PivotedLu};
pub use tolerance::Tolerance;
pub use triangular::back_substitution;

#[doc = include_str!("../../../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("Matrix must be square (got {nrows}x{ncols})")]
    NotSquare { nrows: usize, ncols: usize },

    #[error("Vector size {len} must match matrix dimension {dim}")]
    DimensionMismatch { dim: usize, len: usize },

    #[error("Matrix must be upper triangular (entry ({row}, {col}) is nonzero)")]
    NotUpperTriangular { row: usize, col: usize },

    #[error("Matrix is not self-adjoint (entry ({row}, {col}) differs from its conjugate transpose)")]
    NotHermitian { row: usize, col: usize },

    /// Unpivoted LU only, row exchanges would be needed to continue.
    #[error("Zero pivot encountered at row {row}")]
    ZeroPivot { row: usize },

    #[error("A singular matrix was encountered during a LU factorization (col {col})")]
    Singular { col: usize },

    #[error("Zero diagonal element encountered at row {row}")]
    ZeroDiagonal { row: usize },

    /// `value` is the real part of the Schur complement pivot that failed the test.
    #[error("Matrix is not positive definite at pivot {pivot}: got {value}")]
    NotPositiveDefinite { pivot: usize, value: f64 },
}

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Non-square matrix, or a vector whose length does not match the matrix.
    Shape,
    /// The input lacks a structural property the kernel requires (triangularity, self-adjointness).
    Structural,
    /// A pivot or diagonal entry was zero.
    Singular,
    /// A Cholesky pivot had a non-positive real part.
    NotPositiveDefinite,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotSquare { .. } | Error::DimensionMismatch { .. } => ErrorKind::Shape,
            Error::NotUpperTriangular { .. } | Error::NotHermitian { .. } => ErrorKind::Structural,
            Error::ZeroPivot { .. } | Error::Singular { .. } | Error::ZeroDiagonal { .. } => {
                ErrorKind::Singular
            }
            Error::NotPositiveDefinite { .. } => ErrorKind::NotPositiveDefinite,
        }
    }
}

/// Returns the dimension `n` of a square matrix, or [`Error::NotSquare`].
pub(crate) fn check_square<T, R, C, S>(mat: &Matrix<T, R, C, S>) -> Result<usize, Error>
where
    T: Scalar,
    R: Dim,
    C: Dim,
    S: Storage<T, R, C>,
{
    let (nrows, ncols) = mat.shape();
    if nrows != ncols {
        log::debug!("rejecting non-square {}x{} matrix", nrows, ncols);
        return Err(Error::NotSquare { nrows, ncols });
    }
    Ok(nrows)
}
