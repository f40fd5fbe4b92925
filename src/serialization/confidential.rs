//! Confidential value/asset/nonce wire format
//!
//! Format:
//! - Tag (1 byte)
//! - Payload: 0, 8 or 32 bytes depending on the field kind and the tag class
//!
//! | Kind  | Explicit tags | Commitment tags | Payload |
//! |-------|---------------|-----------------|---------|
//! | Value | 0x01, 0xff    | 0x08, 0x09      | 8 / 32  |
//! | Asset | 0x01, 0xff    | 0x0a, 0x0b      | 32 / 32 |
//! | Nonce | 0x01, 0xff    | 0x02, 0x03      | 32 / 32 |
//!
//! Any other tag is a valid null field with no payload. The width comes from
//! the tag alone; the decoder never looks past it to guess.

use super::cursor::Cursor;
use crate::error::{CodecError, Result};
use crate::types::{ConfidentialField, FieldKind};

/// Decode one confidential field at the cursor position
pub fn decode_confidential<K: FieldKind>(cursor: &mut Cursor<'_>) -> Result<ConfidentialField<K>> {
    let start = cursor.offset();
    let tag = cursor.read_u8()?;
    let needed = K::payload_size(tag);
    let available = cursor.remaining();
    let payload = cursor
        .read_bytes(needed)
        .map_err(|_| CodecError::MalformedConfidentialField {
            kind: K::NAME,
            tag,
            offset: start,
            needed,
            available,
        })?;
    Ok(ConfidentialField::from_wire(tag, payload.to_vec()))
}

/// Decode a confidential field from the start of `data`
///
/// Returns the field and the number of bytes consumed.
pub fn deserialize_confidential<K: FieldKind>(data: &[u8]) -> Result<(ConfidentialField<K>, usize)> {
    let mut cursor = Cursor::new(data, 0);
    let field = decode_confidential(&mut cursor)?;
    Ok((field, cursor.offset()))
}

/// Append the tag and the stored payload verbatim
pub fn encode_confidential<K: FieldKind>(field: &ConfidentialField<K>, out: &mut Vec<u8>) {
    out.push(field.tag());
    out.extend_from_slice(field.payload());
}

pub fn serialize_confidential<K: FieldKind>(field: &ConfidentialField<K>) -> Vec<u8> {
    let mut out = Vec::with_capacity(field.encoded_len());
    encode_confidential(field, &mut out);
    out
}
