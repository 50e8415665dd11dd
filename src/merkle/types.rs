use serde::{Deserialize, Serialize};

use crate::hash::Digest;

/// Errors raised while building or opening a commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MerkleError {
    /// The number of leaves is zero or not a power of two.
    #[error("leaf count {count} is not a power of two")]
    NonPowerOfTwoLeafCount {
        /// Number of supplied leaves.
        count: usize,
    },
    /// Requested opening lies outside the committed vector.
    #[error("leaf index {index} out of range for {leaves} leaves")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of committed leaves.
        leaves: usize,
    },
}

/// Authentication path: sibling digests from the leaf level up to the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    pub siblings: Vec<Digest>,
}

impl MerkleProof {
    pub fn new(siblings: Vec<Digest>) -> Self {
        Self { siblings }
    }

    /// Number of tree levels covered by the path.
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }
}
