use ::core::marker::PhantomData;

use crate::field::{FieldParams, Fp};
use crate::hash::{DefaultHasher, Digest, HashStream, Hasher};

use super::types::{TranscriptError, TranscriptLabel, TranscriptPhase};

const TRANSCRIPT_DOMAIN: &[u8] = b"FRI-PCS-TRANSCRIPT-V1";

#[derive(Clone, Debug)]
struct PhaseTracker {
    stage: Stage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    ExpectPublic,
    ExpectRoot(u8),
    AfterRoot(u8),
    Queries,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            stage: Stage::ExpectPublic,
        }
    }

    fn apply_absorb(&mut self, label: TranscriptLabel) -> Result<TranscriptPhase, TranscriptError> {
        match (self.stage, label) {
            (Stage::ExpectPublic, TranscriptLabel::PublicInstance) => {
                self.stage = Stage::ExpectRoot(0);
                Ok(TranscriptPhase::Public)
            }
            (Stage::ExpectRoot(layer), TranscriptLabel::LayerRoot(idx)) if layer == idx => {
                self.stage = Stage::AfterRoot(layer);
                Ok(TranscriptPhase::Commit(layer))
            }
            (Stage::ExpectRoot(_), TranscriptLabel::LayerRoot(_)) => {
                Err(TranscriptError::BoundsViolation)
            }
            (Stage::AfterRoot(_), TranscriptLabel::FinalValue) => {
                self.stage = Stage::Queries;
                Ok(TranscriptPhase::Queries)
            }
            _ => Err(TranscriptError::InvalidLabel),
        }
    }

    fn apply_challenge(
        &mut self,
        label: TranscriptLabel,
    ) -> Result<TranscriptPhase, TranscriptError> {
        match (self.stage, label) {
            (Stage::AfterRoot(layer), TranscriptLabel::FoldChallenge(idx)) => {
                let next = layer.checked_add(1).ok_or(TranscriptError::Overflow)?;
                if idx != next {
                    return Err(TranscriptError::BoundsViolation);
                }
                self.stage = Stage::ExpectRoot(next);
                Ok(TranscriptPhase::Fold(next))
            }
            (Stage::Queries, TranscriptLabel::QueryIndices) => Ok(TranscriptPhase::Queries),
            _ => Err(TranscriptError::InvalidLabel),
        }
    }
}

/// Deterministic, domain-separated Fiat–Shamir transcript.
///
/// Owned by exactly one party; prover and verifier each drive their own
/// instance in lock-step.
#[derive(Clone, Debug)]
pub struct Transcript<H: Hasher = DefaultHasher> {
    state: Digest,
    phase: TranscriptPhase,
    tracker: PhaseTracker,
    challenge_counter: u64,
    _hasher: PhantomData<H>,
}

impl<H: Hasher> Transcript<H> {
    /// Starts a transcript bound to `protocol_label`.
    pub fn new(protocol_label: &[u8]) -> Self {
        let state = H::hash_parts(&[
            TRANSCRIPT_DOMAIN,
            &(protocol_label.len() as u64).to_be_bytes(),
            protocol_label,
        ]);
        Self {
            state,
            phase: TranscriptPhase::Init,
            tracker: PhaseTracker::new(),
            challenge_counter: 0,
            _hasher: PhantomData,
        }
    }

    /// Absorbs canonical bytes under the supplied label.
    pub fn absorb(&mut self, label: TranscriptLabel, data: &[u8]) -> Result<(), TranscriptError> {
        self.phase = self.tracker.apply_absorb(label)?;
        self.state = mix::<H>(&self.state, label, data);
        Ok(())
    }

    /// Absorbs a digest.
    pub fn absorb_digest(
        &mut self,
        label: TranscriptLabel,
        digest: &Digest,
    ) -> Result<(), TranscriptError> {
        self.absorb(label, digest.as_bytes())
    }

    /// Absorbs the big-endian encoding of a field element.
    pub fn absorb_field_element<P: FieldParams>(
        &mut self,
        label: TranscriptLabel,
        value: &Fp<P>,
    ) -> Result<(), TranscriptError> {
        self.absorb(label, &value.to_bytes_be())
    }

    fn derive_challenge(
        &mut self,
        label: TranscriptLabel,
        output: &mut [u8],
    ) -> Result<(), TranscriptError> {
        let phase = self.tracker.apply_challenge(label)?;
        self.challenge_counter = self
            .challenge_counter
            .checked_add(1)
            .ok_or(TranscriptError::Overflow)?;
        self.phase = phase;

        let mut seed = Vec::with_capacity(32 + 16 + 8);
        seed.extend_from_slice(self.state.as_bytes());
        seed.extend_from_slice(&label.domain_tag());
        seed.extend_from_slice(&self.challenge_counter.to_be_bytes());
        HashStream::<H>::new(&seed).fill(output);

        self.state = mix::<H>(&self.state, label, output);
        Ok(())
    }

    /// Draws a field element challenge.
    pub fn challenge_field_element<P: FieldParams>(
        &mut self,
        label: TranscriptLabel,
    ) -> Result<Fp<P>, TranscriptError> {
        let mut bytes = [0u8; 16];
        self.derive_challenge(label, &mut bytes)?;
        Ok(Fp::from_uniform_bytes(&bytes))
    }

    /// Draws `count` indices in `[0, bound)`.
    ///
    /// Indices are independent draws, so duplicates are possible; their order
    /// is part of the output.
    pub fn challenge_indices(
        &mut self,
        label: TranscriptLabel,
        count: usize,
        bound: usize,
    ) -> Result<Vec<usize>, TranscriptError> {
        if bound == 0 {
            return Err(TranscriptError::RangeZero);
        }
        let len = count.checked_mul(8).ok_or(TranscriptError::Overflow)?;
        let mut bytes = vec![0u8; len];
        self.derive_challenge(label, &mut bytes)?;
        let indices = bytes
            .chunks_exact(8)
            .map(|chunk| {
                let mut word = [0u8; 8];
                word.copy_from_slice(chunk);
                (u64::from_be_bytes(word) % bound as u64) as usize
            })
            .collect();
        Ok(indices)
    }

    /// Returns the digest of the current transcript state.
    pub fn state_digest(&self) -> Digest {
        self.state
    }

    /// Number of challenges derived so far.
    pub fn challenge_count(&self) -> u64 {
        self.challenge_counter
    }

    /// Returns the current transcript phase.
    pub fn phase(&self) -> TranscriptPhase {
        self.phase
    }
}

fn mix<H: Hasher>(state: &Digest, label: TranscriptLabel, data: &[u8]) -> Digest {
    H::hash_parts(&[
        state.as_bytes(),
        &label.domain_tag(),
        &(data.len() as u64).to_be_bytes(),
        data,
    ])
}
