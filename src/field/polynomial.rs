//! Dense polynomials over the prime field.
//! Only the operations the commitment scheme needs are provided: evaluation,
//! degree inspection and conversion to and from evaluation form.

use super::prime_field::{FieldParams, Fp};
use crate::fft::{self, EvaluationDomain, FftError};

/// Dense polynomial represented by coefficients in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<P: FieldParams> {
    /// Coefficients starting from the constant term.
    pub coefficients: Vec<Fp<P>>,
}

impl<P: FieldParams> Polynomial<P> {
    /// Constructs a polynomial from raw coefficients.
    pub fn new(coefficients: Vec<Fp<P>>) -> Self {
        Self { coefficients }
    }

    /// Constructs a polynomial from small integer coefficients.
    pub fn from_u64s(coefficients: &[u64]) -> Self {
        Self::new(coefficients.iter().copied().map(Fp::new).collect())
    }

    /// Evaluates the polynomial at the provided point using Horner's method.
    pub fn evaluate(&self, point: Fp<P>) -> Fp<P> {
        let mut result = Fp::ZERO;
        for coeff in self.coefficients.iter().rev() {
            result = result * point + *coeff;
        }
        result
    }

    /// Returns the degree of the polynomial or `None` if the polynomial is zero.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.iter().rposition(|coeff| !coeff.is_zero())
    }

    /// Evaluates the polynomial over every point of `domain` in natural order.
    ///
    /// Coefficients are zero-padded to the domain size; a polynomial with more
    /// coefficients than the domain has points is rejected.
    pub fn evaluate_over(&self, domain: &EvaluationDomain<P>) -> Result<Vec<Fp<P>>, FftError> {
        if self.coefficients.len() > domain.size() {
            return Err(FftError::InvalidInputLength {
                expected: domain.size(),
                actual: self.coefficients.len(),
            });
        }
        let mut padded = self.coefficients.clone();
        padded.resize(domain.size(), Fp::ZERO);
        fft::forward(&padded, domain)
    }

    /// Recovers the unique polynomial of degree `< domain.size()` taking the
    /// given values over `domain`.
    pub fn interpolate(evaluations: &[Fp<P>], domain: &EvaluationDomain<P>) -> Result<Self, FftError> {
        fft::inverse(evaluations, domain).map(Self::new)
    }
}
