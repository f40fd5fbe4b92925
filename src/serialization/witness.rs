//! Input and output witness wire format
//!
//! Input witness:
//! - Issuance amount range proof (compact length + bytes)
//! - Inflation keys range proof (compact length + bytes)
//! - Script witness (compact count, then compact length + bytes per item)
//! - Peg-in witness (compact count, then compact length + bytes per item)
//!
//! Output witness:
//! - Surjection proof (compact length + bytes)
//! - Range proof (compact length + bytes)
//!
//! Proof contents are opaque and never inspected.

use super::cursor::Cursor;
use super::varint::write_varint;
use crate::error::Result;
use crate::types::{TxInWitness, TxOutWitness};

pub fn decode_input_witness(cursor: &mut Cursor<'_>) -> Result<TxInWitness> {
    let issuance_amount_range_proof = cursor.read_var_bytes()?;
    let inflation_keys_range_proof = cursor.read_var_bytes()?;
    let script_witness = cursor.read_var_bytes_vec()?;
    let pegin_witness = cursor.read_var_bytes_vec()?;
    Ok(TxInWitness {
        issuance_amount_range_proof,
        inflation_keys_range_proof,
        script_witness,
        pegin_witness,
    })
}

pub fn decode_output_witness(cursor: &mut Cursor<'_>) -> Result<TxOutWitness> {
    let surjection_proof = cursor.read_var_bytes()?;
    let range_proof = cursor.read_var_bytes()?;
    Ok(TxOutWitness {
        surjection_proof,
        range_proof,
    })
}

pub fn encode_input_witness(witness: &TxInWitness, out: &mut Vec<u8>) {
    write_var_bytes(&witness.issuance_amount_range_proof, out);
    write_var_bytes(&witness.inflation_keys_range_proof, out);
    write_var_bytes_vec(&witness.script_witness, out);
    write_var_bytes_vec(&witness.pegin_witness, out);
}

pub fn encode_output_witness(witness: &TxOutWitness, out: &mut Vec<u8>) {
    write_var_bytes(&witness.surjection_proof, out);
    write_var_bytes(&witness.range_proof, out);
}

/// Compact length of `bytes` followed by `bytes`
pub fn write_var_bytes(bytes: &[u8], out: &mut Vec<u8>) {
    write_varint(bytes.len() as u64, out);
    out.extend_from_slice(bytes);
}

/// Compact item count followed by each item as length-prefixed bytes
pub fn write_var_bytes_vec(items: &[Vec<u8>], out: &mut Vec<u8>) {
    write_varint(items.len() as u64, out);
    for item in items {
        write_var_bytes(item, out);
    }
}
