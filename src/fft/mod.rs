//! Radix-2 number theoretic transform over two-adic subgroups.
//!
//! An [`EvaluationDomain`] of size `n` is the subgroup `{ω^0, …, ω^{n-1}}`
//! generated by `ω = g^((p-1)/n)`, where `g` generates the full
//! multiplicative group.  Evaluations are always stored in natural order:
//! position `k` holds the value at `ω^k`.
//!
//! [`forward`] maps coefficients to evaluations and [`inverse`] maps them
//! back.  Both run a bit-reversal permutation followed by `log2(n)` butterfly
//! stages; the inverse uses `ω^{-1}` and scales by `n^{-1}`.  Butterflies of
//! one stage are independent and are split across the rayon pool when
//! parallelism is enabled, without changing the result.

mod domain;
mod ifft;
mod radix2;

pub use domain::EvaluationDomain;
pub use ifft::inverse;
pub use radix2::{bit_reverse_index, bit_reverse_permute, forward};

use crate::field::FieldError;

/// Errors surfaced by domain construction and the transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FftError {
    /// Domain size is not a power of two dividing `p - 1`, or the input does
    /// not match the domain it is transformed over.
    #[error("invalid evaluation domain size {size}")]
    InvalidDomainSize {
        /// Offending size.
        size: usize,
    },
    /// A coefficient vector does not fit into the domain.
    #[error("input length {actual} does not fit domain of size {expected}")]
    InvalidInputLength {
        /// Domain size.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// Field arithmetic failed while building domain constants.
    #[error(transparent)]
    Field(#[from] FieldError),
}
