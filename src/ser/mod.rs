//! Canonical byte encoding helpers for proofs.
//!
//! Every integer is written **big-endian**.  Field elements use their 8-byte
//! canonical encoding and are rejected on decode when not reduced.  Digests
//! are raw 32-byte strings.  Sequences carry a `u32` item count and optional
//! values a one-byte discriminant (`0` = absent, `1` = present).

mod collections;
mod cursor;
mod digest;
mod error;
mod felt;
mod ints;

pub use collections::{read_option, read_vec, write_option, write_vec};
pub use cursor::{ensure_consumed, ByteReader};
pub use digest::{read_digest, write_digest};
pub use error::{SerError, SerKind, SerResult};
pub use felt::{read_felt, write_felt};
pub use ints::{ensure_u32, read_u32, read_u64, read_u8, write_u32, write_u64, write_u8};
