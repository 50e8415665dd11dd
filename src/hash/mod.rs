//! Hash primitives consumed by the commitment tree and the transcript.
//!
//! The scheme treats the hash function as an opaque collision-resistant
//! primitive.  Two back-ends implement the [`Hasher`] trait:
//!
//! * [`Blake2s`] – Blake2s-256 from the `blake2` crate, the default.
//! * [`Blake3`] – BLAKE3 from the `blake3` crate.
//!
//! Both produce 32-byte [`Digest`] values.  [`HashStream`] expands a seed into
//! an arbitrary number of output bytes in counter mode and is what the
//! transcript uses to squeeze challenges.

mod blake3;
mod deterministic;

pub use self::blake3::Blake3;
pub use deterministic::{Blake2s, Digest, HashStream, Hasher, HexOutput, DIGEST_SIZE};

/// Hash back-end used when none is named explicitly.
pub type DefaultHasher = Blake2s;
