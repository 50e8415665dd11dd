//! Committed FRI layers.
//!
//! A [`FriLayer`] owns the evaluations of one folded function over its
//! domain together with the Merkle tree committing to them.  Layers are
//! immutable once built; the prover keeps every layer until all queries
//! have been answered.

use crate::fft::EvaluationDomain;
use crate::field::{FieldParams, Fp};
use crate::hash::{Digest, Hasher};
use crate::merkle::MerkleTree;

use super::proof::{Decommitment, LayerOpening};
use super::types::FriError;

/// One committed layer of the FRI chain.
#[derive(Debug, Clone)]
pub struct FriLayer<P: FieldParams, H: Hasher> {
    index: usize,
    domain: EvaluationDomain<P>,
    tree: MerkleTree<P, H>,
    root: Digest,
}

impl<P: FieldParams, H: Hasher> FriLayer<P, H> {
    /// Commits to `values`, which must be evaluations over `domain`.
    pub fn commit(
        index: usize,
        values: Vec<Fp<P>>,
        domain: EvaluationDomain<P>,
    ) -> Result<Self, FriError> {
        if values.len() != domain.size() {
            return Err(FriError::InvalidInputLength {
                expected: domain.size(),
                actual: values.len(),
            });
        }
        let (tree, root) = MerkleTree::commit(values)?;
        Ok(Self {
            index,
            domain,
            tree,
            root,
        })
    }

    /// Position of the layer in the chain, `0` being the input function.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Merkle root of the layer.
    pub fn root(&self) -> Digest {
        self.root
    }

    pub fn domain(&self) -> &EvaluationDomain<P> {
        &self.domain
    }

    /// Committed evaluations in natural order.
    pub fn values(&self) -> &[Fp<P>] {
        self.tree.values()
    }

    pub fn len(&self) -> usize {
        self.tree.leaf_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Opens the position a top-level query `query_index` maps to, and its
    /// fold sibling when `with_sibling` is set.
    pub fn open(&self, query_index: usize, with_sibling: bool) -> Result<LayerOpening<P>, FriError> {
        let size = self.len();
        let position = query_index % size;
        let (value, path) = self.tree.open(position)?;
        let sibling = if with_sibling {
            let (value, path) = self.tree.open(sibling_position(position, size))?;
            Some(Decommitment { value, path })
        } else {
            None
        };
        Ok(LayerOpening {
            value,
            path,
            sibling,
        })
    }
}

/// The position holding `f(-y)` when `position` holds `f(y)`.
pub(crate) fn sibling_position(position: usize, size: usize) -> usize {
    (position + size / 2) % size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::F97;
    use crate::hash::Blake2s;
    use crate::merkle;

    #[test]
    fn openings_verify_against_layer_root() {
        let domain = EvaluationDomain::<F97>::new(8).expect("domain");
        let values: Vec<Fp<F97>> = (0..8).map(|i| Fp::new(i * 3 + 1)).collect();
        let layer = FriLayer::<F97, Blake2s>::commit(0, values.clone(), domain).expect("layer");

        let opening = layer.open(13, true).expect("open");
        assert_eq!(opening.value, values[5]);
        assert!(merkle::verify::<F97, Blake2s>(&layer.root(), 5, &opening.value, &opening.path));

        let sibling = opening.sibling.expect("sibling");
        assert_eq!(sibling.value, values[1]);
        assert!(merkle::verify::<F97, Blake2s>(&layer.root(), 1, &sibling.value, &sibling.path));

        assert!(layer.open(2, false).expect("open").sibling.is_none());
    }

    #[test]
    fn sibling_wraps_around() {
        assert_eq!(sibling_position(1, 8), 5);
        assert_eq!(sibling_position(6, 8), 2);
        assert_eq!(sibling_position(0, 1), 0);
    }
}
