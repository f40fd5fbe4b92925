//! Core types for Elements/Ocean confidential transactions

use crate::constants::*;
use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Hash type: 256-bit hash
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Transaction id: double SHA-256 of the witness-stripped transaction
///
/// Stored in internal byte order; displayed byte-reversed as is customary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(pub Hash);

impl TxId {
    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_reversed_hex(&self.0, f)
    }
}

/// Block hash: double SHA-256 of the signed block header without its proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockHash(pub Hash);

impl BlockHash {
    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_reversed_hex(&self.0, f)
    }
}

fn write_reversed_hex(hash: &Hash, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for byte in hash.iter().rev() {
        write!(f, "{byte:02x}")?;
    }
    Ok(())
}

/// Class of a confidential field, decided by its tag alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldClass {
    /// Tag-only field, no payload
    Null,
    /// Visible value, asset id or nonce
    Explicit,
    /// Blinded commitment
    Commitment,
}

/// Static description of one confidential field kind
pub trait FieldKind:
    fmt::Debug + Clone + Copy + PartialEq + Eq + std::hash::Hash + Send + Sync + 'static
{
    /// Human-readable kind name used in errors
    const NAME: &'static str;
    /// Payload width of the explicit class
    const EXPLICIT_SIZE: usize;
    /// Tags of the commitment class
    const COMMITMENT_TAGS: [u8; 2];

    fn class(tag: u8) -> FieldClass {
        if tag == EXPLICIT_TAG || tag == EXPLICIT_TAG_ALT {
            FieldClass::Explicit
        } else if Self::COMMITMENT_TAGS.contains(&tag) {
            FieldClass::Commitment
        } else {
            FieldClass::Null
        }
    }

    /// Payload width implied by `tag`, excluding the tag byte
    fn payload_size(tag: u8) -> usize {
        match Self::class(tag) {
            FieldClass::Null => 0,
            FieldClass::Explicit => Self::EXPLICIT_SIZE,
            FieldClass::Commitment => COMMITMENT_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonceKind;

impl FieldKind for ValueKind {
    const NAME: &'static str = "value";
    const EXPLICIT_SIZE: usize = EXPLICIT_VALUE_SIZE;
    const COMMITMENT_TAGS: [u8; 2] = VALUE_COMMITMENT_TAGS;
}

impl FieldKind for AssetKind {
    const NAME: &'static str = "asset";
    const EXPLICIT_SIZE: usize = COMMITMENT_SIZE;
    const COMMITMENT_TAGS: [u8; 2] = ASSET_COMMITMENT_TAGS;
}

impl FieldKind for NonceKind {
    const NAME: &'static str = "nonce";
    const EXPLICIT_SIZE: usize = COMMITMENT_SIZE;
    const COMMITMENT_TAGS: [u8; 2] = NONCE_COMMITMENT_TAGS;
}

/// Confidential field: tag byte followed by a tag-determined payload
///
/// The payload is kept exactly as decoded; re-encoding writes the tag and the
/// stored payload verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ConfidentialField<K: FieldKind> {
    tag: u8,
    payload: ByteString,
    #[serde(skip)]
    kind: PhantomData<K>,
}

pub type ConfidentialValue = ConfidentialField<ValueKind>;
pub type ConfidentialAsset = ConfidentialField<AssetKind>;
pub type ConfidentialNonce = ConfidentialField<NonceKind>;

impl<K: FieldKind> ConfidentialField<K> {
    /// Build a field, checking the payload width against the tag
    pub fn new(tag: u8, payload: ByteString) -> Result<Self> {
        let expected = K::payload_size(tag);
        if payload.len() != expected {
            return Err(CodecError::InvalidField(format!(
                "confidential {} tag {:#04x} takes {} payload bytes, got {}",
                K::NAME,
                tag,
                expected,
                payload.len()
            )));
        }
        Ok(Self::from_wire(tag, payload))
    }

    /// Absent field, encoded as the single byte 0x00
    pub fn null() -> Self {
        Self::from_wire(NULL_TAG, Vec::new())
    }

    pub(crate) fn from_wire(tag: u8, payload: ByteString) -> Self {
        Self {
            tag,
            payload,
            kind: PhantomData,
        }
    }

    pub fn tag(&self) -> u8 {
        self.tag
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn class(&self) -> FieldClass {
        K::class(self.tag)
    }

    pub fn is_null(&self) -> bool {
        self.class() == FieldClass::Null
    }

    pub fn is_explicit(&self) -> bool {
        self.class() == FieldClass::Explicit
    }

    pub fn is_commitment(&self) -> bool {
        self.class() == FieldClass::Commitment
    }

    /// Encoded width: 1, 9 or 33 bytes for table-conformant fields
    pub fn encoded_len(&self) -> usize {
        1 + self.payload.len()
    }
}

impl<K: FieldKind> Default for ConfidentialField<K> {
    fn default() -> Self {
        Self::null()
    }
}

impl ConfidentialValue {
    /// Explicit amount; the wire form is big-endian
    pub fn explicit(amount: u64) -> Self {
        Self::from_wire(EXPLICIT_TAG, amount.to_be_bytes().to_vec())
    }

    pub fn explicit_amount(&self) -> Option<u64> {
        if !self.is_explicit() {
            return None;
        }
        let bytes: [u8; EXPLICIT_VALUE_SIZE] = self.payload.as_slice().try_into().ok()?;
        Some(u64::from_be_bytes(bytes))
    }
}

impl ConfidentialAsset {
    pub fn explicit(asset_id: Hash) -> Self {
        Self::from_wire(EXPLICIT_TAG, asset_id.to_vec())
    }

    pub fn explicit_asset_id(&self) -> Option<Hash> {
        if !self.is_explicit() {
            return None;
        }
        self.payload.as_slice().try_into().ok()
    }
}

/// OutPoint: previous transaction hash × output index
///
/// `index` is the stored index: the issuance flag bit has already been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: u32,
}

impl OutPoint {
    /// Outpoint referenced by coinbase-like inputs
    pub fn null() -> Self {
        Self {
            hash: [0u8; 32],
            index: NULL_OUTPOINT_INDEX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.hash == [0u8; 32] && self.index == NULL_OUTPOINT_INDEX
    }
}

/// Asset issuance attached to an input
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetIssuance {
    /// Zero for an initial issuance, the blinding nonce of the asset for a re-issuance
    pub asset_blinding_nonce: Hash,
    pub asset_entropy: Hash,
    pub amount: ConfidentialValue,
    pub inflation_keys: ConfidentialValue,
}

/// Transaction Input: outpoint × script × sequence × optional issuance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prevout: OutPoint,
    pub script_sig: ByteString,
    pub sequence: u32,
    pub issuance: Option<AssetIssuance>,
}

impl TransactionInput {
    /// Null previous outpoint (all-zero hash, index 0xffffffff)
    pub fn is_coinbase(&self) -> bool {
        self.prevout.is_null()
    }

    pub fn has_issuance(&self) -> bool {
        self.issuance.is_some()
    }

    /// Issuance creating a new asset rather than re-issuing an existing one
    pub fn is_initial_issuance(&self) -> bool {
        self.issuance
            .as_ref()
            .map_or(false, |issuance| issuance.asset_blinding_nonce == [0u8; 32])
    }

    /// Previous output index as written on the wire
    ///
    /// The issuance flag is re-applied when an issuance is attached so that the
    /// encoded input decodes back to the same record. Only meaningful when
    /// [`Self::has_encodable_prev_index`] holds.
    /// Whether the stored index survives the issuance flag on the wire
    ///
    /// The null index belongs to the null outpoint and never carries an
    /// issuance. `0x7fffffff` with the flag would read back as null, and any
    /// other index must leave bit 31 to the flag.
    pub fn has_encodable_prev_index(&self) -> bool {
        let index = self.prevout.index;
        if index == NULL_OUTPOINT_INDEX {
            return self.issuance.is_none() && self.prevout.hash == [0u8; 32];
        }
        if self.issuance.is_some() {
            index < OUTPOINT_INDEX_MASK
        } else {
            index & OUTPOINT_ISSUANCE_FLAG == 0
        }
    }

    pub fn wire_prev_index(&self) -> u32 {
        if self.issuance.is_some() && self.prevout.index != NULL_OUTPOINT_INDEX {
            self.prevout.index | OUTPOINT_ISSUANCE_FLAG
        } else {
            self.prevout.index
        }
    }
}

/// Transaction Output: asset × value × nonce × script
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub asset: ConfidentialAsset,
    pub value: ConfidentialValue,
    pub nonce: ConfidentialNonce,
    pub script_pubkey: ByteString,
}

impl TransactionOutput {
    /// Explicit, unblinded output paying `amount` of `asset_id` to `script_pubkey`
    pub fn explicit(asset_id: Hash, amount: u64, script_pubkey: ByteString) -> Self {
        Self {
            asset: ConfidentialAsset::explicit(asset_id),
            value: ConfidentialValue::explicit(amount),
            nonce: ConfidentialNonce::null(),
            script_pubkey,
        }
    }

    /// Fee outputs carry an explicit value and an empty script
    pub fn is_fee(&self) -> bool {
        self.script_pubkey.is_empty() && self.value.is_explicit() && self.asset.is_explicit()
    }
}

/// Per-input witness record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxInWitness {
    pub issuance_amount_range_proof: ByteString,
    pub inflation_keys_range_proof: ByteString,
    pub script_witness: Vec<ByteString>,
    pub pegin_witness: Vec<ByteString>,
}

impl TxInWitness {
    pub fn is_empty(&self) -> bool {
        self.issuance_amount_range_proof.is_empty()
            && self.inflation_keys_range_proof.is_empty()
            && self.script_witness.is_empty()
            && self.pegin_witness.is_empty()
    }
}

/// Per-output witness record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxOutWitness {
    pub surjection_proof: ByteString,
    pub range_proof: ByteString,
}

impl TxOutWitness {
    pub fn is_empty(&self) -> bool {
        self.surjection_proof.is_empty() && self.range_proof.is_empty()
    }
}

/// Transaction: version × flag × inputs × outputs × lock time × witness
///
/// Witness vectors are either both empty or parallel to `inputs` and `outputs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub flag: u8,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
    pub input_witnesses: Vec<TxInWitness>,
    pub output_witnesses: Vec<TxOutWitness>,
}

impl Transaction {
    /// Single input spending the null outpoint
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].is_coinbase()
    }

    pub fn has_witness_flag(&self) -> bool {
        self.flag & WITNESS_FLAG != 0
    }

    /// Witness data exists and would be serialized
    pub fn has_witness(&self) -> bool {
        !self.input_witnesses.is_empty() || !self.output_witnesses.is_empty()
    }

    pub fn witness_counts_consistent(&self) -> bool {
        !self.has_witness()
            || (self.input_witnesses.len() == self.inputs.len()
                && self.output_witnesses.len() == self.outputs.len())
    }

    /// Copy of the transaction with the witness removed and the witness flag cleared
    pub fn without_witness(&self) -> Self {
        Self {
            flag: self.flag & !WITNESS_FLAG,
            input_witnesses: Vec::new(),
            output_witnesses: Vec::new(),
            ..self.clone()
        }
    }

    pub fn issuance_count(&self) -> usize {
        self.inputs.iter().filter(|input| input.has_issuance()).count()
    }
}

/// Result of a single-pass transaction decode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedTransaction {
    pub transaction: Transaction,
    pub txid: TxId,
    pub vsize: u64,
    /// Length of the canonical (witness-stripped) serialization
    pub base_size: usize,
    /// `base_size` plus the witness section
    pub full_size: usize,
    /// Bytes read from the buffer, starting at the decode offset
    pub consumed: usize,
}

/// Signed block header of a pre-dynamic-federation Elements/Ocean chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignedBlockHeader {
    pub version: i32,
    pub prev_block_hash: Hash,
    pub merkle_root: Hash,
    pub time: u32,
    pub height: u32,
    pub challenge: ByteString,
    pub proof: ByteString,
}

/// Block decoded from wire format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedBlock {
    pub header: SignedBlockHeader,
    pub hash: BlockHash,
    pub transactions: Vec<DecodedTransaction>,
}
