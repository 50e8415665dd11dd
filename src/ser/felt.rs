use super::cursor::ByteReader;
use super::error::{SerError, SerKind, SerResult};
use crate::field::{FieldParams, Fp};

/// Writes a field element in canonical big-endian order.
pub fn write_felt<P: FieldParams>(out: &mut Vec<u8>, value: &Fp<P>) {
    out.extend_from_slice(&value.to_bytes_be());
}

/// Reads a canonical field element from the byte cursor.
pub fn read_felt<P: FieldParams>(
    cursor: &mut ByteReader<'_>,
    kind: SerKind,
    field: &'static str,
) -> SerResult<Fp<P>> {
    let bytes = cursor.read_array::<8>(kind, field)?;
    Fp::from_bytes_be(&bytes).map_err(|_| SerError::invalid_value(kind, field))
}
