use serde::{Deserialize, Serialize};

use crate::fft::FftError;
use crate::field::FieldError;
use crate::merkle::MerkleError;
use crate::ser::SerError;
use crate::transcript::TranscriptError;

/// Label every FRI transcript is seeded with.
pub const PROTOCOL_LABEL: &[u8] = b"fri-pcs/v1";

/// Construction errors raised by the prover, the verifier and parameter
/// derivation.  These indicate a caller contract violation and are never
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FriError {
    /// Domain or final layer size is not a power of two dividing `p - 1`.
    #[error("invalid domain size {size}")]
    InvalidDomainSize {
        /// Offending size.
        size: usize,
    },
    /// Evaluation vector does not match the domain.
    #[error("evaluation vector has length {actual}, expected {expected}")]
    InvalidInputLength {
        /// Domain size.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// Declared degree bound is not a power of two below the domain size, or
    /// the folding schedule does not reduce it to exactly a constant.
    #[error("degree bound {degree_bound} cannot be tested over domain size {domain_size} with {rounds} fold rounds")]
    DegreeTooLarge {
        /// Declared bound (exclusive).
        degree_bound: usize,
        /// Initial domain size.
        domain_size: usize,
        /// Number of fold rounds the parameters allow.
        rounds: usize,
    },
    /// A field inversion of zero was attempted.
    #[error("division by zero")]
    DivisionByZero,
    /// Zero queries were requested.
    #[error("query count must be non-zero")]
    InvalidQueryCount,
    /// Proof shape does not match the public parameters.
    #[error("malformed proof: {0}")]
    MalformedProof(&'static str),
    /// Transcript was driven out of order.
    #[error("transcript error: {0}")]
    Transcript(#[from] TranscriptError),
    /// Commitment construction failed.
    #[error("merkle error: {0}")]
    Merkle(#[from] MerkleError),
    /// Proof bytes could not be encoded or decoded.
    #[error("proof encoding error: {0}")]
    Serialization(#[from] SerError),
    /// Proof construction was cancelled between rounds.
    #[error("proof construction aborted")]
    Aborted,
}

impl From<FieldError> for FriError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::DivisionByZero => FriError::DivisionByZero,
            FieldError::NonCanonical => FriError::MalformedProof("non-canonical field element"),
        }
    }
}

impl From<FftError> for FriError {
    fn from(err: FftError) -> Self {
        match err {
            FftError::InvalidDomainSize { size } => FriError::InvalidDomainSize { size },
            FftError::InvalidInputLength { expected, actual } => {
                FriError::InvalidInputLength { expected, actual }
            }
            FftError::Field(inner) => inner.into(),
        }
    }
}

/// Outcome of verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Every query passed every check.
    Accept,
    /// At least one check failed.
    Reject,
}

impl Verdict {
    /// Returns `true` for [`Verdict::Accept`].
    pub fn is_accept(self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

/// Reason a well-formed proof was rejected.  Only surfaced through logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub(crate) enum Rejection {
    #[error("merkle path mismatch at layer {layer} of query {query}")]
    MerklePathMismatch { query: usize, layer: usize },
    #[error("fold consistency mismatch folding layer {layer} of query {query}")]
    FoldConsistencyMismatch { query: usize, layer: usize },
    #[error("final value mismatch (query {query:?})")]
    FinalValueMismatch { query: Option<usize> },
}

/// Prover and verifier options that are not part of the public statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriOptions {
    /// Size of the last committed layer.  Defaults to
    /// `domain_size / degree_bound.next_power_of_two()`.
    pub final_layer_size: Option<usize>,
}

impl FriOptions {
    /// Options with an explicit final layer size.
    pub fn with_final_layer_size(final_layer_size: usize) -> Self {
        Self {
            final_layer_size: Some(final_layer_size),
        }
    }
}
