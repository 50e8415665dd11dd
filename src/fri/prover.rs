use core::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, instrument};

use crate::fft::EvaluationDomain;
use crate::field::{FieldParams, Fp};
use crate::hash::{DefaultHasher, Hasher};
use crate::merkle::MerkleError;
use crate::transcript::{Transcript, TranscriptError, TranscriptLabel};

use super::folding::fold_layer;
use super::layer::FriLayer;
use super::params::FriParameters;
use super::proof::{FriProof, QueryOpening};
use super::types::{FriError, FriOptions, PROTOCOL_LABEL};

/// Converts a layer or round index into its transcript label byte.
pub(crate) fn label_index(index: usize) -> Result<u8, FriError> {
    u8::try_from(index).map_err(|_| FriError::Transcript(TranscriptError::Overflow))
}

/// Binary FRI prover.
///
/// Stateless apart from its options; every call to [`FriProver::prove`]
/// drives a fresh transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct FriProver<P: FieldParams, H: Hasher = DefaultHasher> {
    options: FriOptions,
    _marker: PhantomData<(P, H)>,
}

impl<P: FieldParams, H: Hasher> FriProver<P, H> {
    pub fn new(options: FriOptions) -> Self {
        Self {
            options,
            _marker: PhantomData,
        }
    }

    pub fn options(&self) -> &FriOptions {
        &self.options
    }

    /// Proves that `evaluations` over `domain` agree with a polynomial of
    /// degree `< degree_bound`.
    pub fn prove(
        &self,
        evaluations: &[Fp<P>],
        domain: &EvaluationDomain<P>,
        degree_bound: usize,
        query_count: usize,
    ) -> Result<FriProof<P>, FriError> {
        self.commit_inner(evaluations, domain, degree_bound, query_count, None)?
            .into_proof()
    }

    /// Like [`FriProver::prove`], but checks `cancel` between rounds and
    /// returns [`FriError::Aborted`] once it is set.
    pub fn prove_cancellable(
        &self,
        evaluations: &[Fp<P>],
        domain: &EvaluationDomain<P>,
        degree_bound: usize,
        query_count: usize,
        cancel: &AtomicBool,
    ) -> Result<FriProof<P>, FriError> {
        self.commit_inner(evaluations, domain, degree_bound, query_count, Some(cancel))?
            .into_proof()
    }

    /// Runs the commit and fold phases and derives the query indices, keeping
    /// every layer so that further query sets can be opened.
    pub fn commit(
        &self,
        evaluations: &[Fp<P>],
        domain: &EvaluationDomain<P>,
        degree_bound: usize,
        query_count: usize,
    ) -> Result<FriCommitment<P, H>, FriError> {
        self.commit_inner(evaluations, domain, degree_bound, query_count, None)
    }

    #[instrument(
        skip_all,
        fields(
            field = P::NAME,
            domain_size = domain.size(),
            degree_bound = degree_bound,
            query_count = query_count
        )
    )]
    fn commit_inner(
        &self,
        evaluations: &[Fp<P>],
        domain: &EvaluationDomain<P>,
        degree_bound: usize,
        query_count: usize,
        cancel: Option<&AtomicBool>,
    ) -> Result<FriCommitment<P, H>, FriError> {
        if evaluations.len() != domain.size() {
            return Err(FriError::InvalidInputLength {
                expected: domain.size(),
                actual: evaluations.len(),
            });
        }
        let params =
            FriParameters::derive::<P>(domain.size(), degree_bound, query_count, &self.options)?;
        let cancelled = || cancel.is_some_and(|flag| flag.load(Ordering::Relaxed));

        let mut transcript = Transcript::<H>::new(PROTOCOL_LABEL);
        transcript.absorb(TranscriptLabel::PublicInstance, &params.instance_bytes::<P>())?;

        let mut layers = Vec::with_capacity(params.rounds + 1);
        let first = FriLayer::commit(0, evaluations.to_vec(), domain.clone())?;
        transcript.absorb_digest(TranscriptLabel::LayerRoot(0), &first.root())?;
        debug!(layer = 0, size = first.len(), root = %first.root().to_hex(), "committed layer");
        layers.push(first);

        for round in 1..=params.rounds {
            if cancelled() {
                debug!(round, "proof construction aborted");
                return Err(FriError::Aborted);
            }
            let label = label_index(round)?;
            let beta = transcript
                .challenge_field_element::<P>(TranscriptLabel::FoldChallenge(label))?;

            let previous = &layers[round - 1];
            let folded = fold_layer(previous.values(), beta, previous.domain())?;
            let next_domain = previous.domain().squared()?;
            let layer = FriLayer::commit(round, folded, next_domain)?;
            transcript.absorb_digest(TranscriptLabel::LayerRoot(label), &layer.root())?;
            debug!(layer = round, size = layer.len(), root = %layer.root().to_hex(), "committed layer");
            layers.push(layer);
        }
        if cancelled() {
            return Err(FriError::Aborted);
        }

        let final_value = layers
            .last()
            .and_then(|layer| layer.values().first().copied())
            .ok_or(FriError::MalformedProof("empty layer chain"))?;
        transcript.absorb_field_element(TranscriptLabel::FinalValue, &final_value)?;

        let query_indices = transcript.challenge_indices(
            TranscriptLabel::QueryIndices,
            params.query_count,
            params.domain_size,
        )?;
        debug!(rounds = params.rounds, queries = query_indices.len(), "derived query indices");

        Ok(FriCommitment {
            params,
            layers,
            final_value,
            query_indices,
        })
    }
}

/// Layers built by one prover run, retained for answering queries.
#[derive(Debug, Clone)]
pub struct FriCommitment<P: FieldParams, H: Hasher = DefaultHasher> {
    params: FriParameters,
    layers: Vec<FriLayer<P, H>>,
    final_value: Fp<P>,
    query_indices: Vec<usize>,
}

impl<P: FieldParams, H: Hasher> FriCommitment<P, H> {
    pub fn parameters(&self) -> &FriParameters {
        &self.params
    }

    pub fn layers(&self) -> &[FriLayer<P, H>] {
        &self.layers
    }

    pub fn final_value(&self) -> Fp<P> {
        self.final_value
    }

    /// Indices derived from the transcript, in draw order.
    pub fn query_indices(&self) -> &[usize] {
        &self.query_indices
    }

    /// Opens every layer at the positions the given top-level indices map
    /// to.  Indices must lie in the initial domain.
    pub fn open(&self, indices: &[usize]) -> Result<Vec<QueryOpening<P>>, FriError> {
        let last = self.layers.len() - 1;
        indices
            .iter()
            .map(|&index| {
                if index >= self.params.domain_size {
                    return Err(MerkleError::IndexOutOfRange {
                        index,
                        leaves: self.params.domain_size,
                    }
                    .into());
                }
                let layers = self
                    .layers
                    .iter()
                    .map(|layer| layer.open(index, layer.index() < last))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(QueryOpening { layers })
            })
            .collect()
    }

    /// Answers the transcript-derived queries and releases the layers.
    pub fn into_proof(self) -> Result<FriProof<P>, FriError> {
        let queries = self.open(&self.query_indices)?;
        Ok(FriProof {
            domain_size: self.params.domain_size,
            roots: self.layers.iter().map(FriLayer::root).collect(),
            final_value: self.final_value,
            queries,
        })
    }
}

/// Proves with the default hasher and options.
pub fn prove<P: FieldParams>(
    evaluations: &[Fp<P>],
    domain: &EvaluationDomain<P>,
    degree_bound: usize,
    query_count: usize,
) -> Result<FriProof<P>, FriError> {
    FriProver::<P>::new(FriOptions::default()).prove(evaluations, domain, degree_bound, query_count)
}
