use crate::field::{FieldParams, Fp};

use super::FftError;

/// Multiplicative subgroup of size `2^k` used as evaluation points.
///
/// The twiddle tables hold `ω^i` and `ω^{-i}` for `i < n/2` so the
/// transforms never recompute powers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationDomain<P: FieldParams> {
    size: usize,
    generator: Fp<P>,
    size_inv: Fp<P>,
    twiddles: Vec<Fp<P>>,
    inverse_twiddles: Vec<Fp<P>>,
}

impl<P: FieldParams> EvaluationDomain<P> {
    /// Builds the subgroup of order `size`.
    ///
    /// Fails with [`FftError::InvalidDomainSize`] unless `size` is a power of
    /// two no larger than `2^TWO_ADICITY`.
    pub fn new(size: usize) -> Result<Self, FftError> {
        let generator = Self::root_of_unity(size)?;
        let generator_inv = generator.inv()?;
        let size_inv = Fp::<P>::new(size as u64).inv()?;

        let half = size / 2;
        let twiddles = powers(generator, half);
        let inverse_twiddles = powers(generator_inv, half);

        Ok(Self {
            size,
            generator,
            size_inv,
            twiddles,
            inverse_twiddles,
        })
    }

    /// Primitive `size`-th root of unity, without building twiddle tables.
    pub fn root_of_unity(size: usize) -> Result<Fp<P>, FftError> {
        if size == 0 || !size.is_power_of_two() {
            return Err(FftError::InvalidDomainSize { size });
        }
        let log_size = size.trailing_zeros();
        if log_size > P::TWO_ADICITY {
            return Err(FftError::InvalidDomainSize { size });
        }
        let cofactor = (P::MODULUS - 1) >> log_size;
        Ok(Fp::<P>::generator().pow(cofactor))
    }

    /// Number of points in the domain.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Primitive `n`-th root of unity generating the domain.
    pub fn generator(&self) -> Fp<P> {
        self.generator
    }

    /// `n^{-1}` in the field.
    pub fn size_inv(&self) -> Fp<P> {
        self.size_inv
    }

    /// Returns `ω^index`.
    pub fn element(&self, index: usize) -> Fp<P> {
        if self.twiddles.is_empty() {
            return Fp::ONE;
        }
        let reduced = index % self.size;
        if reduced < self.twiddles.len() {
            self.twiddles[reduced]
        } else {
            -self.twiddles[reduced - self.twiddles.len()]
        }
    }

    /// All domain points in natural order.
    pub fn elements(&self) -> Vec<Fp<P>> {
        powers(self.generator, self.size)
    }

    /// The domain `{d^2 : d ∈ D}`, of half the size.
    pub fn squared(&self) -> Result<Self, FftError> {
        if self.size < 2 {
            return Err(FftError::InvalidDomainSize { size: self.size / 2 });
        }
        Self::new(self.size / 2)
    }

    pub(crate) fn twiddles(&self) -> &[Fp<P>] {
        &self.twiddles
    }

    pub(crate) fn inverse_twiddles(&self) -> &[Fp<P>] {
        &self.inverse_twiddles
    }
}

fn powers<P: FieldParams>(base: Fp<P>, count: usize) -> Vec<Fp<P>> {
    let mut out = Vec::with_capacity(count);
    let mut current = Fp::ONE;
    for _ in 0..count {
        out.push(current);
        current *= base;
    }
    out
}
