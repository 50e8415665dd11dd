//! Binary Merkle commitments over vectors of field elements.
//!
//! The module fixes the following layout:
//!
//! * **Leaf count:** must be a power of two; there is no padding.
//!   [`MerkleTree::commit`] fails with
//!   [`MerkleError::NonPowerOfTwoLeafCount`] otherwise.
//! * **Leaf layout:** a leaf is the 8-byte big-endian encoding of one field
//!   element, hashed as `H(0x00 || value)`.
//! * **Internal nodes:** `H(0x01 || left || right)`.  The one-byte tags keep
//!   leaves and nodes in disjoint domains.
//! * **Storage:** nodes live in one flat arena indexed heap-style.  Index `1`
//!   is the root, node `i` has children `2i` and `2i + 1`, and leaf `k` sits
//!   at `n + k`.
//! * **Paths:** sibling digests ordered bottom-up, `log2(n)` entries.

mod proof;
mod traits;
mod tree;
mod types;

pub use proof::{compute_root_from_path, verify};
pub use traits::{MerkleHasher, LEAF_DOMAIN_TAG, NODE_DOMAIN_TAG};
pub use tree::MerkleTree;
pub use types::{MerkleError, MerkleProof};
