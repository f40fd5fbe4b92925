//! Confidential transaction wire format serialization/deserialization
//!
//! Format:
//! - Version (4 bytes, little-endian, signed)
//! - Flag (1 byte; bit 0 = witness section present)
//! - Input count (compact length)
//! - For each input:
//!   - Previous output hash (32 bytes)
//!   - Previous output index (4 bytes, little-endian; bit 31 = issuance follows)
//!   - Script length (compact length) + script bytes
//!   - Sequence (4 bytes, little-endian)
//!   - If issuance flagged: blinding nonce (32), entropy (32), amount, inflation keys
//! - Output count (compact length)
//! - For each output: asset, value, nonce, script length + script bytes
//! - Lock time (4 bytes, little-endian)
//! - If flag bit 0: one input witness per input, then one output witness per output
//!
//! The transaction id covers version, a zero flag byte and everything from the
//! input count through the lock time. The decoder collects those bytes during
//! its single pass instead of re-serializing.

use super::confidential::{decode_confidential, encode_confidential};
use super::cursor::Cursor;
use super::varint::write_varint;
use super::witness::{
    decode_input_witness, decode_output_witness, encode_input_witness, encode_output_witness,
    write_var_bytes,
};
use crate::config::{CodecConfig, EncodeOptions};
use crate::constants::*;
use crate::error::{CodecError, Result};
use crate::hash::{calculate_vsize, sha256d};
use crate::types::*;
use tracing::{debug, trace};

/// Smallest possible encoded input: hash, index, empty script, sequence
const MIN_INPUT_SIZE: usize = 32 + 4 + 1 + 4;

/// Smallest possible encoded output: three null fields and an empty script
const MIN_OUTPUT_SIZE: usize = 4;

/// Decode a transaction starting at `offset` within `data`
///
/// Produces the transaction together with its id, virtual size and the sizes
/// they were derived from. Any out-of-bounds read aborts the whole decode.
pub fn decode_transaction(
    data: &[u8],
    offset: usize,
    config: &CodecConfig,
) -> Result<DecodedTransaction> {
    let mut cursor = Cursor::with_config(data, offset, config);

    let version = cursor.read_i32_le()?;
    let mut id_bytes = Vec::with_capacity(cursor.remaining().min(4096) + 5);
    id_bytes.extend_from_slice(&version.to_le_bytes());
    // The id always sees a cleared flag
    id_bytes.push(0x00);

    let flag = cursor.read_u8()?;
    let body_start = cursor.offset();

    let input_count = cursor.read_count()?;
    trace!(offset = cursor.offset(), input_count, "decoding inputs");
    let mut inputs = Vec::with_capacity(input_count.min(cursor.remaining() / MIN_INPUT_SIZE));
    for _ in 0..input_count {
        inputs.push(decode_input(&mut cursor)?);
    }

    let output_count = cursor.read_count()?;
    trace!(offset = cursor.offset(), output_count, "decoding outputs");
    let mut outputs = Vec::with_capacity(output_count.min(cursor.remaining() / MIN_OUTPUT_SIZE));
    for _ in 0..output_count {
        outputs.push(decode_output(&mut cursor)?);
    }

    let lock_time = cursor.read_u32_le()?;
    id_bytes.extend_from_slice(cursor.consumed_since(body_start));

    let witness_start = cursor.offset();
    let mut input_witnesses = Vec::new();
    let mut output_witnesses = Vec::new();
    if flag & WITNESS_FLAG != 0 {
        trace!(offset = witness_start, "decoding witness section");
        input_witnesses.reserve(inputs.len());
        for _ in 0..inputs.len() {
            input_witnesses.push(decode_input_witness(&mut cursor)?);
        }
        output_witnesses.reserve(outputs.len());
        for _ in 0..outputs.len() {
            output_witnesses.push(decode_output_witness(&mut cursor)?);
        }
    }
    let witness_size = cursor.offset() - witness_start;

    if config.reject_trailing_bytes && cursor.remaining() > 0 {
        return Err(CodecError::TrailingBytes {
            offset: cursor.offset(),
            remaining: cursor.remaining(),
        });
    }

    let base_size = id_bytes.len();
    let full_size = base_size + witness_size;
    let txid = TxId(sha256d(&id_bytes));
    let vsize = calculate_vsize(base_size, full_size);

    debug!(
        %txid,
        inputs = inputs.len(),
        outputs = outputs.len(),
        base_size,
        full_size,
        vsize,
        "decoded transaction"
    );

    Ok(DecodedTransaction {
        transaction: Transaction {
            version,
            flag,
            inputs,
            outputs,
            lock_time,
            input_witnesses,
            output_witnesses,
        },
        txid,
        vsize,
        base_size,
        full_size,
        consumed: cursor.offset() - offset,
    })
}

/// Decode a transaction from the start of `data` with the default configuration
pub fn deserialize_transaction(data: &[u8]) -> Result<DecodedTransaction> {
    decode_transaction(data, 0, &CodecConfig::default())
}

fn decode_input(cursor: &mut Cursor<'_>) -> Result<TransactionInput> {
    let hash: Hash = cursor.read_array()?;
    let index_offset = cursor.offset();
    let raw_index = cursor.read_u32_le()?;
    let script_sig = cursor.read_var_bytes()?;
    let sequence = cursor.read_u32_le()?;

    let mut index = raw_index;
    let mut issuance = None;
    if raw_index != NULL_OUTPOINT_INDEX {
        if raw_index & OUTPOINT_ISSUANCE_FLAG != 0 {
            issuance = Some(decode_issuance(cursor)?);
        }
        index &= OUTPOINT_INDEX_MASK;
    } else if hash != [0u8; 32] {
        return Err(CodecError::InvalidPrevIndex {
            offset: index_offset,
        });
    }

    Ok(TransactionInput {
        prevout: OutPoint { hash, index },
        script_sig,
        sequence,
        issuance,
    })
}

fn decode_issuance(cursor: &mut Cursor<'_>) -> Result<AssetIssuance> {
    trace!(offset = cursor.offset(), "decoding asset issuance");
    Ok(AssetIssuance {
        asset_blinding_nonce: cursor.read_array()?,
        asset_entropy: cursor.read_array()?,
        amount: decode_confidential(cursor)?,
        inflation_keys: decode_confidential(cursor)?,
    })
}

fn decode_output(cursor: &mut Cursor<'_>) -> Result<TransactionOutput> {
    Ok(TransactionOutput {
        asset: decode_confidential(cursor)?,
        value: decode_confidential(cursor)?,
        nonce: decode_confidential(cursor)?,
        script_pubkey: cursor.read_var_bytes()?,
    })
}

/// Serialize a transaction to wire format
///
/// - `skip_output_locktime`: stop after the inputs
/// - `skip_witness`: leave out the witness section
///
/// The flag byte is written as stored. The witness section is written only when
/// witness data exists and is not skipped, and its lengths must then match the
/// input and output counts. Every input must pass
/// [`TransactionInput::has_encodable_prev_index`].
pub fn serialize_transaction(tx: &Transaction, options: EncodeOptions) -> Result<Vec<u8>> {
    if let Some((position, input)) = tx
        .inputs
        .iter()
        .enumerate()
        .find(|(_, input)| !input.has_encodable_prev_index())
    {
        return Err(CodecError::InvalidField(format!(
            "input {} prev index {:#010x} cannot be encoded (issuance attached: {})",
            position,
            input.prevout.index,
            input.has_issuance()
        )));
    }
    let use_witness = !options.skip_witness && tx.has_witness();
    if use_witness && !tx.witness_counts_consistent() {
        return Err(CodecError::InconsistentWitnessCount {
            inputs: tx.inputs.len(),
            input_witnesses: tx.input_witnesses.len(),
            outputs: tx.outputs.len(),
            output_witnesses: tx.output_witnesses.len(),
        });
    }

    let mut result = Vec::new();
    result.extend_from_slice(&tx.version.to_le_bytes());
    result.push(tx.flag);
    encode_inputs(tx, &mut result);

    if !options.skip_output_locktime {
        encode_outputs(tx, &mut result);
        result.extend_from_slice(&tx.lock_time.to_le_bytes());

        if use_witness {
            for witness in &tx.input_witnesses {
                encode_input_witness(witness, &mut result);
            }
            for witness in &tx.output_witnesses {
                encode_output_witness(witness, &mut result);
            }
        }
    }

    trace!(
        len = result.len(),
        witness = use_witness,
        skip_output_locktime = options.skip_output_locktime,
        "serialized transaction"
    );
    Ok(result)
}

/// Output count followed by the encoded outputs
pub fn serialize_outputs(tx: &Transaction) -> Vec<u8> {
    let mut result = Vec::new();
    encode_outputs(tx, &mut result);
    result
}

/// Canonical bytes hashed into the transaction id
///
/// Version, a zero flag byte, inputs, outputs and lock time; never the witness.
pub fn serialize_for_txid(tx: &Transaction) -> Vec<u8> {
    let mut result = Vec::new();
    result.extend_from_slice(&tx.version.to_le_bytes());
    result.push(0x00);
    encode_inputs(tx, &mut result);
    encode_outputs(tx, &mut result);
    result.extend_from_slice(&tx.lock_time.to_le_bytes());
    result
}

fn encode_inputs(tx: &Transaction, out: &mut Vec<u8>) {
    write_varint(tx.inputs.len() as u64, out);
    for input in &tx.inputs {
        encode_input(input, out);
    }
}

fn encode_input(input: &TransactionInput, out: &mut Vec<u8>) {
    out.extend_from_slice(&input.prevout.hash);
    out.extend_from_slice(&input.wire_prev_index().to_le_bytes());
    write_var_bytes(&input.script_sig, out);
    out.extend_from_slice(&input.sequence.to_le_bytes());

    if let Some(issuance) = &input.issuance {
        out.extend_from_slice(&issuance.asset_blinding_nonce);
        out.extend_from_slice(&issuance.asset_entropy);
        encode_confidential(&issuance.amount, out);
        encode_confidential(&issuance.inflation_keys, out);
    }
}

fn encode_outputs(tx: &Transaction, out: &mut Vec<u8>) {
    write_varint(tx.outputs.len() as u64, out);
    for output in &tx.outputs {
        encode_confidential(&output.asset, out);
        encode_confidential(&output.value, out);
        encode_confidential(&output.nonce, out);
        write_var_bytes(&output.script_pubkey, out);
    }
}
