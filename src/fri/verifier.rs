//! FRI verifier.
//!
//! Verification runs in three steps:
//!
//! 1. **Shape.** The proof must carry one root per layer, one opening per
//!    query, one entry per layer in every opening, and paths of the depth
//!    each layer implies.  Violations are construction errors
//!    ([`FriError::MalformedProof`]), not rejections.
//! 2. **Replay.** The transcript is driven exactly as the prover drove it,
//!    re-deriving every fold challenge and the query indices.  This is the
//!    only sequential step.
//! 3. **Queries.** Each query is checked independently: Merkle paths against
//!    the layer roots, each fold against the value opened in the next layer,
//!    and the last layer against the final constant.  Queries are spread over
//!    the rayon pool when parallelism is enabled.

use core::marker::PhantomData;

use tracing::{debug, instrument};

use crate::fft::EvaluationDomain;
use crate::field::{FieldParams, Fp};
use crate::hash::{DefaultHasher, Hasher};
use crate::merkle;
use crate::transcript::{Transcript, TranscriptLabel};

use super::folding::{fold_pair, two_inverse};
use super::layer::sibling_position;
use super::params::FriParameters;
use super::proof::{FriProof, QueryOpening};
use super::prover::label_index;
use super::types::{FriError, FriOptions, Rejection, Verdict, PROTOCOL_LABEL};

/// Binary FRI verifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct FriVerifier<P: FieldParams, H: Hasher = DefaultHasher> {
    options: FriOptions,
    _marker: PhantomData<(P, H)>,
}

/// Values every query check needs, fixed by the replayed transcript.
struct ReplayedChallenges<P: FieldParams> {
    /// `betas[i]` folds layer `i` into layer `i + 1`.
    betas: Vec<Fp<P>>,
    query_indices: Vec<usize>,
    /// Inverse generator of each layer domain.
    generator_invs: Vec<Fp<P>>,
}

impl<P: FieldParams, H: Hasher> FriVerifier<P, H> {
    pub fn new(options: FriOptions) -> Self {
        Self {
            options,
            _marker: PhantomData,
        }
    }

    /// Checks `proof` against the public statement.
    ///
    /// Returns `Ok(Verdict::Reject)` for any failed check and an error only
    /// when the statement is invalid or the proof is structurally malformed.
    #[instrument(
        skip_all,
        fields(
            field = P::NAME,
            domain_size = domain_size,
            degree_bound = degree_bound,
            query_count = query_count
        )
    )]
    pub fn verify(
        &self,
        proof: &FriProof<P>,
        domain_size: usize,
        degree_bound: usize,
        query_count: usize,
    ) -> Result<Verdict, FriError> {
        let params = FriParameters::derive::<P>(domain_size, degree_bound, query_count, &self.options)?;
        match self.check(proof, &params)? {
            Ok(()) => {
                debug!("proof accepted");
                Ok(Verdict::Accept)
            }
            Err(rejection) => {
                debug!(reason = %rejection, "proof rejected");
                Ok(Verdict::Reject)
            }
        }
    }

    pub(crate) fn check(
        &self,
        proof: &FriProof<P>,
        params: &FriParameters,
    ) -> Result<Result<(), Rejection>, FriError> {
        check_shape(proof, params)?;

        if params.degree_bound == 0 && !proof.final_value.is_zero() {
            return Ok(Err(Rejection::FinalValueMismatch { query: None }));
        }

        let challenges = replay::<P, H>(proof, params)?;
        Ok(check_queries::<P, H>(proof, params, &challenges))
    }
}

fn check_shape<P: FieldParams>(proof: &FriProof<P>, params: &FriParameters) -> Result<(), FriError> {
    if proof.domain_size != params.domain_size {
        return Err(FriError::MalformedProof("domain-size"));
    }
    let layer_count = params.rounds + 1;
    if proof.roots.len() != layer_count {
        return Err(FriError::MalformedProof("root-count"));
    }
    if proof.queries.len() != params.query_count {
        return Err(FriError::MalformedProof("query-count"));
    }
    for query in &proof.queries {
        if query.layers.len() != layer_count {
            return Err(FriError::MalformedProof("layer-count"));
        }
        for (index, layer) in query.layers.iter().enumerate() {
            let depth = params.layer_size(index).trailing_zeros() as usize;
            if layer.path.depth() != depth {
                return Err(FriError::MalformedProof("path-length"));
            }
            match (&layer.sibling, index < params.rounds) {
                (Some(sibling), true) if sibling.path.depth() != depth => {
                    return Err(FriError::MalformedProof("path-length"));
                }
                (Some(_), true) | (None, false) => {}
                (None, true) => return Err(FriError::MalformedProof("missing-sibling")),
                (Some(_), false) => return Err(FriError::MalformedProof("unexpected-sibling")),
            }
        }
    }
    Ok(())
}

fn replay<P: FieldParams, H: Hasher>(
    proof: &FriProof<P>,
    params: &FriParameters,
) -> Result<ReplayedChallenges<P>, FriError> {
    let mut transcript = Transcript::<H>::new(PROTOCOL_LABEL);
    transcript.absorb(TranscriptLabel::PublicInstance, &params.instance_bytes::<P>())?;
    transcript.absorb_digest(TranscriptLabel::LayerRoot(0), &proof.roots[0])?;

    let mut betas = Vec::with_capacity(params.rounds);
    for (round, root) in proof.roots.iter().enumerate().skip(1) {
        let label = label_index(round)?;
        betas.push(transcript.challenge_field_element::<P>(TranscriptLabel::FoldChallenge(label))?);
        transcript.absorb_digest(TranscriptLabel::LayerRoot(label), root)?;
    }
    transcript.absorb_field_element(TranscriptLabel::FinalValue, &proof.final_value)?;
    let query_indices = transcript.challenge_indices(
        TranscriptLabel::QueryIndices,
        params.query_count,
        params.domain_size,
    )?;

    let mut generator_invs = Vec::with_capacity(params.rounds + 1);
    let mut current = EvaluationDomain::<P>::root_of_unity(params.domain_size)?.inv()?;
    for _ in 0..=params.rounds {
        generator_invs.push(current);
        current = current.square();
    }

    Ok(ReplayedChallenges {
        betas,
        query_indices,
        generator_invs,
    })
}

#[cfg(feature = "parallel")]
fn check_queries<P: FieldParams, H: Hasher>(
    proof: &FriProof<P>,
    params: &FriParameters,
    challenges: &ReplayedChallenges<P>,
) -> Result<(), Rejection> {
    let run = |(query, (opening, &index)): (usize, (&QueryOpening<P>, &usize))| {
        check_query::<P, H>(query, index, opening, proof, params, challenges)
    };
    if crate::utils::parallelism_enabled() {
        use rayon::prelude::*;
        proof
            .queries
            .par_iter()
            .zip(challenges.query_indices.par_iter())
            .enumerate()
            .try_for_each(run)
    } else {
        proof
            .queries
            .iter()
            .zip(challenges.query_indices.iter())
            .enumerate()
            .try_for_each(run)
    }
}

#[cfg(not(feature = "parallel"))]
fn check_queries<P: FieldParams, H: Hasher>(
    proof: &FriProof<P>,
    params: &FriParameters,
    challenges: &ReplayedChallenges<P>,
) -> Result<(), Rejection> {
    proof
        .queries
        .iter()
        .zip(challenges.query_indices.iter())
        .enumerate()
        .try_for_each(|(query, (opening, &index))| {
            check_query::<P, H>(query, index, opening, proof, params, challenges)
        })
}

fn check_query<P: FieldParams, H: Hasher>(
    query: usize,
    index: usize,
    opening: &QueryOpening<P>,
    proof: &FriProof<P>,
    params: &FriParameters,
    challenges: &ReplayedChallenges<P>,
) -> Result<(), Rejection> {
    let two_inv = two_inverse::<P>();
    for (layer, (current, root)) in opening.layers.iter().zip(&proof.roots).enumerate() {
        let size = params.layer_size(layer);
        let position = index % size;
        if !merkle::verify::<P, H>(root, position, &current.value, &current.path) {
            return Err(Rejection::MerklePathMismatch { query, layer });
        }
        if layer == params.rounds {
            if current.value != proof.final_value {
                return Err(Rejection::FinalValueMismatch { query: Some(query) });
            }
            break;
        }

        let Some(sibling) = &current.sibling else {
            return Err(Rejection::MerklePathMismatch { query, layer });
        };
        let sibling_at = sibling_position(position, size);
        if !merkle::verify::<P, H>(root, sibling_at, &sibling.value, &sibling.path) {
            return Err(Rejection::MerklePathMismatch { query, layer });
        }

        let half = size / 2;
        let (lo, hi) = if position < half {
            (current.value, sibling.value)
        } else {
            (sibling.value, current.value)
        };
        let y_inv = challenges.generator_invs[layer].pow((position % half) as u64);
        let folded = fold_pair(lo, hi, challenges.betas[layer], y_inv, two_inv);
        if folded != opening.layers[layer + 1].value {
            return Err(Rejection::FoldConsistencyMismatch { query, layer });
        }
    }
    Ok(())
}

/// Verifies with the default hasher and options.
pub fn verify<P: FieldParams>(
    proof: &FriProof<P>,
    domain_size: usize,
    degree_bound: usize,
    query_count: usize,
) -> Result<Verdict, FriError> {
    FriVerifier::<P>::new(FriOptions::default()).verify(proof, domain_size, degree_bound, query_count)
}
