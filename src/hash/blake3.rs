//! BLAKE3 back-end.

use super::deterministic::{Digest, Hasher};

/// BLAKE3 with 32-byte output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake3;

impl Hasher for Blake3 {
    const NAME: &'static str = "blake3";

    fn hash_parts(parts: &[&[u8]]) -> Digest {
        let mut hasher = ::blake3::Hasher::new();
        for part in parts {
            hasher.update(part);
        }
        Digest::from_bytes(*hasher.finalize().as_bytes())
    }
}
