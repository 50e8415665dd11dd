use core::marker::PhantomData;

use tracing::trace;

use crate::field::{FieldParams, Fp};
use crate::hash::{Digest, Hasher};

use super::traits::MerkleHasher;
use super::types::{MerkleError, MerkleProof};

/// Commitment to a vector of field elements, kept for later openings.
///
/// Immutable after [`MerkleTree::commit`].
#[derive(Clone, Debug)]
pub struct MerkleTree<P: FieldParams, H: Hasher> {
    values: Vec<Fp<P>>,
    nodes: Vec<Digest>,
    marker: PhantomData<H>,
}

impl<P: FieldParams, H: Hasher> MerkleTree<P, H> {
    /// Hashes every value to a leaf and folds the leaves pairwise up to the
    /// root.  Returns the tree together with its root.
    pub fn commit(values: Vec<Fp<P>>) -> Result<(Self, Digest), MerkleError> {
        let leaf_count = values.len();
        if leaf_count == 0 || !leaf_count.is_power_of_two() {
            return Err(MerkleError::NonPowerOfTwoLeafCount { count: leaf_count });
        }

        let mut nodes = vec![Digest::default(); 2 * leaf_count];
        hash_leaves::<P, H>(&values, &mut nodes[leaf_count..]);

        let mut width = leaf_count / 2;
        while width >= 1 {
            let (upper, lower) = nodes.split_at_mut(2 * width);
            hash_level::<H>(&mut upper[width..], &lower[..2 * width]);
            width /= 2;
        }

        let tree = Self {
            values,
            nodes,
            marker: PhantomData,
        };
        let root = tree.root();
        trace!(leaves = leaf_count, root = %root.to_hex(), "merkle commit");
        Ok((tree, root))
    }

    /// Root digest.
    pub fn root(&self) -> Digest {
        self.nodes[1]
    }

    /// Number of committed leaves.
    pub fn leaf_count(&self) -> usize {
        self.values.len()
    }

    /// Committed values in leaf order.
    pub fn values(&self) -> &[Fp<P>] {
        &self.values
    }

    /// Length of every authentication path.
    pub fn depth(&self) -> usize {
        self.leaf_count().trailing_zeros() as usize
    }

    /// Returns the value at `index` and its authentication path.
    pub fn open(&self, index: usize) -> Result<(Fp<P>, MerkleProof), MerkleError> {
        let leaves = self.leaf_count();
        if index >= leaves {
            return Err(MerkleError::IndexOutOfRange { index, leaves });
        }
        let mut siblings = Vec::with_capacity(self.depth());
        let mut position = leaves + index;
        while position > 1 {
            siblings.push(self.nodes[position ^ 1]);
            position >>= 1;
        }
        Ok((self.values[index], MerkleProof::new(siblings)))
    }
}

#[cfg(feature = "parallel")]
fn hash_leaves<P: FieldParams, H: Hasher>(values: &[Fp<P>], out: &mut [Digest]) {
    if crate::utils::parallelism_enabled() {
        use rayon::prelude::*;
        let chunk = crate::utils::preferred_chunk_size(values.len());
        out.par_iter_mut()
            .zip(values.par_iter())
            .with_min_len(chunk)
            .for_each(|(slot, value)| *slot = H::hash_leaf(value));
    } else {
        for (slot, value) in out.iter_mut().zip(values) {
            *slot = H::hash_leaf(value);
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn hash_leaves<P: FieldParams, H: Hasher>(values: &[Fp<P>], out: &mut [Digest]) {
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = H::hash_leaf(value);
    }
}

#[cfg(feature = "parallel")]
fn hash_level<H: Hasher>(parents: &mut [Digest], children: &[Digest]) {
    if crate::utils::parallelism_enabled() {
        use rayon::prelude::*;
        let chunk = crate::utils::preferred_chunk_size(parents.len());
        parents
            .par_iter_mut()
            .enumerate()
            .with_min_len(chunk)
            .for_each(|(index, slot)| {
                *slot = H::hash_nodes(&children[2 * index], &children[2 * index + 1]);
            });
    } else {
        for (index, slot) in parents.iter_mut().enumerate() {
            *slot = H::hash_nodes(&children[2 * index], &children[2 * index + 1]);
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn hash_level<H: Hasher>(parents: &mut [Digest], children: &[Digest]) {
    for (index, slot) in parents.iter_mut().enumerate() {
        *slot = H::hash_nodes(&children[2 * index], &children[2 * index + 1]);
    }
}
