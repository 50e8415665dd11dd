//! Fiat–Shamir transcript for the FRI commitment scheme.
//!
//! The transcript follows a fixed sequence of phases that bind the public
//! instance, every layer commitment and the derived challenges.  Every label
//! is an enum variant with its own 16-byte domain tag, so no challenge can be
//! reinterpreted as another.  The canonical order is:
//!
//! | Phase | Label | Operation | Purpose |
//! |-------|-------|-----------|---------|
//! | Public | [`TranscriptLabel::PublicInstance`] | absorb | Field modulus, domain size, degree bound, query count, final layer size. |
//! | Commit | [`TranscriptLabel::LayerRoot(0)`](TranscriptLabel::LayerRoot) | absorb | Root of the initial evaluations. |
//! | Fold | [`TranscriptLabel::FoldChallenge(i)`](TranscriptLabel::FoldChallenge) | challenge | Folding randomness `β_i` for round `i ≥ 1`. |
//! | Fold | [`TranscriptLabel::LayerRoot(i)`](TranscriptLabel::LayerRoot) | absorb | Root of layer `i`. |
//! | Final | [`TranscriptLabel::FinalValue`] | absorb | The constant the last layer collapses to. |
//! | Queries | [`TranscriptLabel::QueryIndices`] | challenge | Query positions into the initial domain. |
//!
//! Any other ordering fails with [`TranscriptError::InvalidLabel`]; a layer
//! or round index out of sequence fails with
//! [`TranscriptError::BoundsViolation`].  In particular query indices cannot be
//! drawn before every root and the final value are bound.
//!
//! Determinism guarantee: two transcripts created with the same protocol label
//! that absorb byte-identical data under the same labels in the same order
//! produce identical challenges and state digests.

mod core;
mod types;

pub use self::core::Transcript;
pub use types::{TranscriptError, TranscriptLabel, TranscriptPhase};
