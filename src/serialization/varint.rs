//! Compact-length encoding/decoding
//!
//! The compact length is the Bitcoin-style variable-width unsigned integer used
//! for every count and byte-string length in the transaction wire format.
//!
//! Encoding rules:
//! - If value < 0xfd: single byte
//! - If value <= 0xffff: 0xfd prefix + 2 bytes (little-endian)
//! - If value <= 0xffffffff: 0xfe prefix + 4 bytes (little-endian)
//! - Otherwise: 0xff prefix + 8 bytes (little-endian)
//!
//! Encoding is always minimal. Decoding rejects non-minimal encodings when
//! strict mode is requested, since a non-minimal length would not re-encode to
//! the same bytes.

use crate::error::{CodecError, Result};

/// Encode a u64 value as a compact length
///
/// # Examples
///
/// ```
/// use ocean_tx::serialization::varint::encode_varint;
///
/// assert_eq!(encode_varint(0), vec![0]);
/// assert_eq!(encode_varint(252), vec![252]);
/// assert_eq!(encode_varint(253), vec![0xfd, 253, 0]);
/// assert_eq!(encode_varint(65536), vec![0xfe, 0, 0, 1, 0]);
/// ```
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut result = Vec::with_capacity(varint_size(value));
    write_varint(value, &mut result);
    result
}

/// Append the compact length encoding of `value` to `out`
pub fn write_varint(value: u64, out: &mut Vec<u8>) {
    if value < 0xfd {
        out.push(value as u8);
    } else if value <= 0xffff {
        out.push(0xfd);
        out.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= 0xffff_ffff {
        out.push(0xfe);
        out.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        out.push(0xff);
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Number of bytes `value` occupies once encoded
pub fn varint_size(value: u64) -> usize {
    match value {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}

/// Decode a strictly minimal compact length from the start of `data`
///
/// Returns the decoded value and the number of bytes consumed.
///
/// # Examples
///
/// ```
/// use ocean_tx::serialization::varint::decode_varint;
///
/// assert_eq!(decode_varint(&[252]).unwrap(), (252, 1));
/// assert_eq!(decode_varint(&[0xfd, 253, 0]).unwrap(), (253, 3));
/// assert!(decode_varint(&[]).is_err());
/// assert!(decode_varint(&[0xfd, 1, 0]).is_err());
/// ```
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize)> {
    decode_varint_at(data, 0, true)
}

/// Decode a compact length located at `offset` within `data`
///
/// Error offsets are reported relative to the start of `data`, so a cursor
/// walking a larger buffer gets positions that point into that buffer.
pub fn decode_varint_at(data: &[u8], offset: usize, strict: bool) -> Result<(u64, usize)> {
    let available = data.len().saturating_sub(offset);
    if available == 0 {
        return Err(CodecError::TruncatedInput {
            offset,
            needed: 1,
            available,
        });
    }

    let (width, minimum) = match data[offset] {
        b if b < 0xfd => return Ok((b as u64, 1)),
        0xfd => (3, 0xfd),
        0xfe => (5, 0x1_0000),
        _ => (9, 0x1_0000_0000),
    };

    if available < width {
        return Err(CodecError::TruncatedInput {
            offset,
            needed: width,
            available,
        });
    }

    let mut buf = [0u8; 8];
    buf[..width - 1].copy_from_slice(&data[offset + 1..offset + width]);
    let value = u64::from_le_bytes(buf);

    if strict && value < minimum {
        return Err(CodecError::InvalidCompactLength {
            offset,
            value,
            width,
        });
    }

    Ok((value, width))
}
