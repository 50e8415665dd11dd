/// Transcript phases exposed for diagnostics and sequencing checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptPhase {
    /// Nothing but the protocol label has been absorbed.
    Init,
    /// Public instance bound, waiting for the first root.
    Public,
    /// Layer `i` has been committed.
    Commit(u8),
    /// Fold challenge for round `i` has been drawn.
    Fold(u8),
    /// Final value bound; query indices may be drawn.
    Queries,
}

/// Canonical transcript labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptLabel {
    /// Public parameters of the statement.
    PublicInstance,
    /// Merkle root of layer `i`.
    LayerRoot(u8),
    /// Folding challenge of round `i`.
    FoldChallenge(u8),
    /// Constant value of the last layer.
    FinalValue,
    /// Challenge stream used to derive query indices.
    QueryIndices,
}

impl TranscriptLabel {
    pub(crate) fn domain_tag(self) -> [u8; 16] {
        match self {
            TranscriptLabel::PublicInstance => *b"FRI_LABEL_PUBIN_",
            TranscriptLabel::LayerRoot(idx) => {
                let mut tag = *b"FRI_LABEL_ROOT__";
                tag[15] = idx;
                tag
            }
            TranscriptLabel::FoldChallenge(idx) => {
                let mut tag = *b"FRI_LABEL_BETA__";
                tag[15] = idx;
                tag
            }
            TranscriptLabel::FinalValue => *b"FRI_LABEL_FINAL_",
            TranscriptLabel::QueryIndices => *b"FRI_LABEL_QUERY_",
        }
    }
}

/// Error type returned by the transcript API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptError {
    /// Label was used outside of the canonical phase ordering.
    #[error("label used outside canonical phase order")]
    InvalidLabel,
    /// A layer or round index did not follow its predecessor.
    #[error("transcript bounds violated")]
    BoundsViolation,
    /// Index range passed to `challenge_indices` was zero.
    #[error("challenge range must be non-zero")]
    RangeZero,
    /// Internal counter overflowed the supported range.
    #[error("internal counter overflow")]
    Overflow,
}
