use crate::field::{FieldParams, Fp};
use crate::hash::{Digest, Hasher};

/// Tag prepended to leaf payloads.
pub const LEAF_DOMAIN_TAG: u8 = 0x00;
/// Tag prepended to the concatenated children of an internal node.
pub const NODE_DOMAIN_TAG: u8 = 0x01;

/// Domain-separated leaf and node hashing on top of a [`Hasher`].
pub trait MerkleHasher: Hasher {
    fn hash_leaf<P: FieldParams>(value: &Fp<P>) -> Digest {
        Self::hash_parts(&[&[LEAF_DOMAIN_TAG], &value.to_bytes_be()])
    }

    fn hash_nodes(left: &Digest, right: &Digest) -> Digest {
        Self::hash_parts(&[&[NODE_DOMAIN_TAG], left.as_bytes(), right.as_bytes()])
    }
}

impl<H: Hasher> MerkleHasher for H {}
