//! Bounds-checked read cursor over an immutable byte buffer
//!
//! One cursor belongs to one decode operation. The buffer itself is only
//! borrowed, so any number of cursors may walk the same buffer concurrently.

use super::varint::decode_varint_at;
use crate::config::CodecConfig;
use crate::error::{CodecError, Result};

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
    strict_compact_length: bool,
    max_item_count: u64,
}

impl<'a> Cursor<'a> {
    /// Cursor positioned at `offset` using the default configuration
    pub fn new(data: &'a [u8], offset: usize) -> Self {
        Self::with_config(data, offset, &CodecConfig::default())
    }

    pub fn with_config(data: &'a [u8], offset: usize, config: &CodecConfig) -> Self {
        Self {
            data,
            offset,
            strict_compact_length: config.strict_compact_length,
            max_item_count: config.max_item_count,
        }
    }

    /// Current absolute position in the buffer
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Bytes read since `start`, borrowed from the underlying buffer
    pub fn consumed_since(&self, start: usize) -> &'a [u8] {
        &self.data[start..self.offset]
    }

    /// Read exactly `len` bytes
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if available < len {
            return Err(CodecError::TruncatedInput {
                offset: self.offset,
                needed: len,
                available,
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32_le(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Read a compact length
    pub fn read_varint(&mut self) -> Result<u64> {
        let (value, width) = decode_varint_at(self.data, self.offset, self.strict_compact_length)?;
        self.offset += width;
        Ok(value)
    }

    /// Read a compact length used as an item count, bounded by the configured maximum
    pub fn read_count(&mut self) -> Result<usize> {
        let start = self.offset;
        let count = self.read_varint()?;
        if count > self.max_item_count {
            return Err(CodecError::LengthOverflow {
                offset: start,
                length: count,
            });
        }
        usize::try_from(count).map_err(|_| CodecError::LengthOverflow {
            offset: start,
            length: count,
        })
    }

    /// Read a compact length followed by that many bytes, copied out of the buffer
    pub fn read_var_bytes(&mut self) -> Result<Vec<u8>> {
        let start = self.offset;
        let len = self.read_varint()?;
        let len = usize::try_from(len).map_err(|_| CodecError::LengthOverflow {
            offset: start,
            length: len,
        })?;
        Ok(self.read_bytes(len)?.to_vec())
    }

    /// Read a compact count followed by that many length-prefixed byte strings
    pub fn read_var_bytes_vec(&mut self) -> Result<Vec<Vec<u8>>> {
        let count = self.read_count()?;
        // Each item takes at least one byte, so the remaining length bounds the allocation
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(self.read_var_bytes()?);
        }
        Ok(items)
    }
}
