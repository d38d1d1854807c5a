use nalgebra::{ComplexField, RealField};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Tolerance used by the structural and definiteness checks of the kernels.
///
/// Exact-zero tests on pivots and diagonal entries do not go through the tolerance, only the
/// near-zero / near-equality comparisons do:
///
/// ```math
/// negligible(x)  <=>  |x| <= atol
/// close(a, b)    <=>  |a - b| <= atol + rtol * |b|
/// positive(x)    <=>  x > atol
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-serialize",
    serde(bound(serialize = "N: Serialize", deserialize = "N: Deserialize<'de>"))
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Tolerance<N> {
    /// absolute tolerance
    pub atol: N,
    /// relative tolerance
    pub rtol: N,
}

impl<N: RealField> Tolerance<N> {
    /// Absolute tolerance of `1e-10` with no relative component.
    pub const DEFAULT_ATOL: f64 = 1e-10;

    pub fn new(atol: N) -> Self {
        Self {
            atol,
            rtol: N::zero(),
        }
    }

    pub fn with_rtol(self, rtol: N) -> Self {
        Self { rtol, ..self }
    }

    /// `|x| <= atol`
    pub fn is_negligible<T>(&self, x: T) -> bool
    where
        T: ComplexField<RealField = N>,
    {
        x.modulus() <= self.atol
    }

    /// `|a - b| <= atol + rtol * |b|`
    pub fn is_close<T>(&self, a: T, b: T) -> bool
    where
        T: ComplexField<RealField = N>,
    {
        let bound = self.atol.clone() + self.rtol.clone() * b.clone().modulus();
        (a - b).modulus() <= bound
    }

    /// `x > atol`
    pub fn is_positive(&self, x: &N) -> bool {
        *x > self.atol
    }
}

impl<N: RealField> Default for Tolerance<N> {
    fn default() -> Self {
        Self::new(nalgebra::convert(Self::DEFAULT_ATOL))
    }
}
