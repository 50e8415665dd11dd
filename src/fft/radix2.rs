use tracing::trace;

use crate::field::{FieldParams, Fp};

use super::{EvaluationDomain, FftError};

/// Reverses the low `log_size` bits of `index`.
pub fn bit_reverse_index(index: usize, log_size: u32) -> usize {
    if log_size == 0 {
        return 0;
    }
    index.reverse_bits() >> (usize::BITS - log_size)
}

/// Permutes `values` into bit-reversed order in place.
pub fn bit_reverse_permute<T>(values: &mut [T]) {
    let n = values.len();
    if n <= 2 {
        return;
    }
    let log_size = n.trailing_zeros();
    for index in 0..n {
        let reversed = bit_reverse_index(index, log_size);
        if index < reversed {
            values.swap(index, reversed);
        }
    }
}

/// Evaluates the polynomial with the given coefficients over `domain`.
///
/// `coefficients.len()` must equal `domain.size()`.
pub fn forward<P: FieldParams>(
    coefficients: &[Fp<P>],
    domain: &EvaluationDomain<P>,
) -> Result<Vec<Fp<P>>, FftError> {
    if coefficients.len() != domain.size() {
        return Err(FftError::InvalidDomainSize {
            size: coefficients.len(),
        });
    }
    trace!(size = domain.size(), "ntt forward");
    let mut values = coefficients.to_vec();
    transform_in_place(&mut values, domain.twiddles());
    Ok(values)
}

/// Iterative Cooley-Tukey over a vector whose length is a power of two.
///
/// `twiddles` holds `w^i` for `i < n/2` where `w` is a primitive `n`-th
/// root of unity.  Stage `s` combines elements `2^{s-1}` apart with
/// `w^{(n / 2^s) · j}`.
pub(crate) fn transform_in_place<P: FieldParams>(values: &mut [Fp<P>], twiddles: &[Fp<P>]) {
    let n = values.len();
    if n <= 1 {
        return;
    }
    bit_reverse_permute(values);

    let mut block = 2;
    while block <= n {
        let stride = n / block;
        for_each_block(values, block, |chunk| butterfly_block(chunk, twiddles, stride));
        block <<= 1;
    }
}

fn butterfly_block<P: FieldParams>(chunk: &mut [Fp<P>], twiddles: &[Fp<P>], stride: usize) {
    let half = chunk.len() / 2;
    let (lo, hi) = chunk.split_at_mut(half);
    for (j, (left, right)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
        let t = *right * twiddles[j * stride];
        let u = *left;
        *left = u + t;
        *right = u - t;
    }
}

#[cfg(feature = "parallel")]
fn for_each_block<P, F>(values: &mut [Fp<P>], block: usize, op: F)
where
    P: FieldParams,
    F: Fn(&mut [Fp<P>]) + Send + Sync,
{
    if crate::utils::parallelism_enabled() && values.len() / block > 1 {
        use rayon::prelude::*;
        values.par_chunks_mut(block).for_each(op);
    } else {
        values.chunks_mut(block).for_each(op);
    }
}

#[cfg(not(feature = "parallel"))]
fn for_each_block<P, F>(values: &mut [Fp<P>], block: usize, op: F)
where
    P: FieldParams,
    F: Fn(&mut [Fp<P>]),
{
    values.chunks_mut(block).for_each(op);
}
