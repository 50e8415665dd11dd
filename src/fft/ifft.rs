//! Inverse transform for polynomial reconstruction.

use tracing::trace;

use crate::field::{FieldParams, Fp};

use super::radix2::transform_in_place;
use super::{EvaluationDomain, FftError};

/// Interpolates the coefficients of the unique polynomial of degree `< n`
/// taking `evaluations` over `domain`.
pub fn inverse<P: FieldParams>(
    evaluations: &[Fp<P>],
    domain: &EvaluationDomain<P>,
) -> Result<Vec<Fp<P>>, FftError> {
    if evaluations.len() != domain.size() {
        return Err(FftError::InvalidDomainSize {
            size: evaluations.len(),
        });
    }
    trace!(size = domain.size(), "ntt inverse");
    let mut values = evaluations.to_vec();
    transform_in_place(&mut values, domain.inverse_twiddles());
    let scale = domain.size_inv();
    for value in values.iter_mut() {
        *value *= scale;
    }
    Ok(values)
}
