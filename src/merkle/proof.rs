use crate::field::{FieldParams, Fp};
use crate::hash::{Digest, Hasher};

use super::traits::MerkleHasher;
use super::types::MerkleProof;

/// Recomputes the root implied by `value` sitting at `index` under `path`.
///
/// Returns `None` when `index` does not fit in a tree of the path's depth.
pub fn compute_root_from_path<P: FieldParams, H: Hasher>(
    index: usize,
    value: &Fp<P>,
    path: &MerkleProof,
) -> Option<Digest> {
    let depth = path.depth();
    if depth >= usize::BITS as usize || index >> depth != 0 {
        return None;
    }
    let mut current = H::hash_leaf(value);
    let mut position = index;
    for sibling in &path.siblings {
        current = if position & 1 == 0 {
            H::hash_nodes(&current, sibling)
        } else {
            H::hash_nodes(sibling, &current)
        };
        position >>= 1;
    }
    Some(current)
}

/// Checks that `value` is committed at `index` under `root`.
///
/// Pure; never panics on malformed input.
pub fn verify<P: FieldParams, H: Hasher>(
    root: &Digest,
    index: usize,
    value: &Fp<P>,
    path: &MerkleProof,
) -> bool {
    compute_root_from_path::<P, H>(index, value, path).is_some_and(|computed| computed == *root)
}
