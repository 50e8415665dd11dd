//! Binary folding of one FRI layer into the next.
//!
//! Writing `f(x) = f_e(x^2) + x · f_o(x^2)`, the values at `y` and `-y` give
//!
//! ```text
//! f_e(y^2) = (f(y) + f(-y)) / 2
//! f_o(y^2) = (f(y) - f(-y)) / (2y)
//! ```
//!
//! and the folded layer holds `f_e + β · f_o` over the squared domain.  In a
//! layer of size `N` stored in natural order the pair sits at positions `k`
//! and `k + N/2`, with `y = ω_N^k`, and lands at position `k` of the next
//! layer.

use crate::fft::EvaluationDomain;
use crate::field::{FieldParams, Fp};

use super::types::FriError;

/// `2^{-1}`, which is `(p + 1) / 2` for any odd prime.
pub(crate) fn two_inverse<P: FieldParams>() -> Fp<P> {
    Fp::new(P::MODULUS / 2 + 1)
}

/// Folds the values at `y` (`lo`) and `-y` (`hi`) with challenge `beta`.
pub fn fold_pair<P: FieldParams>(
    lo: Fp<P>,
    hi: Fp<P>,
    beta: Fp<P>,
    y_inv: Fp<P>,
    two_inv: Fp<P>,
) -> Fp<P> {
    ((lo + hi) + beta * (lo - hi) * y_inv) * two_inv
}

/// Folds a full layer evaluated over `domain`, halving its length.
pub fn fold_layer<P: FieldParams>(
    values: &[Fp<P>],
    beta: Fp<P>,
    domain: &EvaluationDomain<P>,
) -> Result<Vec<Fp<P>>, FriError> {
    if values.len() != domain.size() {
        return Err(FriError::InvalidInputLength {
            expected: domain.size(),
            actual: values.len(),
        });
    }
    if values.len() < 2 {
        return Err(FriError::InvalidDomainSize { size: values.len() });
    }

    let half = values.len() / 2;
    let (lower, upper) = values.split_at(half);
    let mut folded = vec![Fp::ZERO; half];
    fold_into(&mut folded, lower, upper, domain.inverse_twiddles(), beta);
    Ok(folded)
}

#[cfg(feature = "parallel")]
fn fold_into<P: FieldParams>(
    out: &mut [Fp<P>],
    lower: &[Fp<P>],
    upper: &[Fp<P>],
    y_inv: &[Fp<P>],
    beta: Fp<P>,
) {
    let two_inv = two_inverse::<P>();
    if crate::utils::parallelism_enabled() {
        use rayon::prelude::*;
        let chunk = crate::utils::preferred_chunk_size(out.len());
        out.par_iter_mut()
            .enumerate()
            .with_min_len(chunk)
            .for_each(|(k, slot)| *slot = fold_pair(lower[k], upper[k], beta, y_inv[k], two_inv));
    } else {
        for (k, slot) in out.iter_mut().enumerate() {
            *slot = fold_pair(lower[k], upper[k], beta, y_inv[k], two_inv);
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn fold_into<P: FieldParams>(
    out: &mut [Fp<P>],
    lower: &[Fp<P>],
    upper: &[Fp<P>],
    y_inv: &[Fp<P>],
    beta: Fp<P>,
) {
    let two_inv = two_inverse::<P>();
    for (k, slot) in out.iter_mut().enumerate() {
        *slot = fold_pair(lower[k], upper[k], beta, y_inv[k], two_inv);
    }
}
