//! Signed block header and block wire format
//!
//! Header format (pre-dynamic-federation Elements/Ocean):
//! - Version (4 bytes, little-endian)
//! - Previous block hash (32 bytes)
//! - Merkle root (32 bytes)
//! - Time (4 bytes, little-endian)
//! - Height (4 bytes, little-endian)
//! - Challenge script (compact length + bytes)
//! - Proof (compact length + bytes)
//!
//! The block hash covers every header field except the proof, which signs it.
//! A block is the header followed by a compact transaction count and the
//! transactions back-to-back.

use super::cursor::Cursor;
use super::transaction::decode_transaction;
use super::witness::write_var_bytes;
use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::hash::sha256d;
use crate::types::*;
use tracing::debug;

/// Decode a signed block header at the cursor position, returning it with its hash
pub fn decode_block_header(cursor: &mut Cursor<'_>) -> Result<(SignedBlockHeader, BlockHash)> {
    let start = cursor.offset();
    let version = cursor.read_i32_le()?;
    let prev_block_hash = cursor.read_array()?;
    let merkle_root = cursor.read_array()?;
    let time = cursor.read_u32_le()?;
    let height = cursor.read_u32_le()?;
    let challenge = cursor.read_var_bytes()?;
    let hash = BlockHash(sha256d(cursor.consumed_since(start)));
    let proof = cursor.read_var_bytes()?;

    Ok((
        SignedBlockHeader {
            version,
            prev_block_hash,
            merkle_root,
            time,
            height,
            challenge,
            proof,
        },
        hash,
    ))
}

pub fn deserialize_block_header(data: &[u8]) -> Result<(SignedBlockHeader, BlockHash)> {
    decode_block_header(&mut Cursor::new(data, 0))
}

/// Serialize a signed block header; with `include_proof` false this is the hashed preimage
pub fn serialize_block_header(header: &SignedBlockHeader, include_proof: bool) -> Vec<u8> {
    let mut result = Vec::with_capacity(80 + header.challenge.len() + header.proof.len());
    result.extend_from_slice(&header.version.to_le_bytes());
    result.extend_from_slice(&header.prev_block_hash);
    result.extend_from_slice(&header.merkle_root);
    result.extend_from_slice(&header.time.to_le_bytes());
    result.extend_from_slice(&header.height.to_le_bytes());
    write_var_bytes(&header.challenge, &mut result);
    if include_proof {
        write_var_bytes(&header.proof, &mut result);
    }
    result
}

pub fn block_hash(header: &SignedBlockHeader) -> BlockHash {
    BlockHash(sha256d(&serialize_block_header(header, false)))
}

/// Decode a block: header, transaction count, then each transaction in turn
///
/// Every transaction is decoded from the same buffer at its own offset. With
/// `reject_trailing_bytes` set, bytes after the last transaction are an error.
pub fn decode_block(data: &[u8], config: &CodecConfig) -> Result<DecodedBlock> {
    let mut cursor = Cursor::with_config(data, 0, config);
    let (header, hash) = decode_block_header(&mut cursor)?;
    let tx_count = cursor.read_count()?;

    // Transactions in a block are back-to-back
    let tx_config = CodecConfig {
        reject_trailing_bytes: false,
        ..config.clone()
    };
    let mut offset = cursor.offset();
    let mut transactions = Vec::with_capacity(tx_count.min(cursor.remaining()));
    for _ in 0..tx_count {
        let decoded = decode_transaction(data, offset, &tx_config)?;
        offset += decoded.consumed;
        transactions.push(decoded);
    }

    if config.reject_trailing_bytes && offset < data.len() {
        return Err(CodecError::TrailingBytes {
            offset,
            remaining: data.len() - offset,
        });
    }

    debug!(%hash, height = header.height, transactions = transactions.len(), "decoded block");

    Ok(DecodedBlock {
        header,
        hash,
        transactions,
    })
}
