use super::cursor::ByteReader;
use super::error::{SerKind, SerResult};
use crate::hash::{Digest, DIGEST_SIZE};

/// Writes a raw digest to the output buffer.
pub fn write_digest(out: &mut Vec<u8>, digest: &Digest) {
    out.extend_from_slice(digest.as_bytes());
}

/// Reads a digest from the byte cursor.
pub fn read_digest(
    cursor: &mut ByteReader<'_>,
    kind: SerKind,
    field: &'static str,
) -> SerResult<Digest> {
    cursor
        .read_array::<DIGEST_SIZE>(kind, field)
        .map(Digest::from_bytes)
}
