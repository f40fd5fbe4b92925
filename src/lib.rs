//! # Ocean-Tx
//!
//! Byte-exact codec for Elements/Ocean confidential transactions.
//!
//! This crate turns raw transaction bytes into a structured [`Transaction`] and
//! back. Decoding is a single linear pass that also collects the canonical,
//! witness-stripped bytes used for the transaction id, so the id and the
//! virtual size come out of the same pass without re-parsing.
//!
//! ## Architecture
//!
//! - Compact length codec (`serialization::varint`)
//! - Confidential value/asset/nonce codec (`serialization::confidential`)
//! - Witness codec (`serialization::witness`)
//! - Transaction model (`types`)
//! - Transaction deserializer and serializer (`serialization::transaction`)
//! - Signed block header, a neighbouring consumer of the same primitives (`serialization::block`)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every encode/decode call depends only on its input and options
//! 2. **Byte-Exact Round Trips**: `serialize(deserialize(x)) == x` for well-formed `x`
//! 3. **Owned Results**: decoded records never borrow from the source buffer
//! 4. **No Validation**: scripts, proofs and signatures are opaque bytes
//!
//! ## Usage
//!
//! ```rust
//! use ocean_tx::{EncodeOptions, OceanCodec};
//! use ocean_tx::types::*;
//!
//! let codec = OceanCodec::new();
//! let tx = Transaction {
//!     version: 2,
//!     flag: 0,
//!     inputs: vec![TransactionInput {
//!         prevout: OutPoint { hash: [1; 32], index: 0 },
//!         script_sig: vec![],
//!         sequence: 0xffffffff,
//!         issuance: None,
//!     }],
//!     outputs: vec![TransactionOutput::explicit([0x25; 32], 1000, vec![0x51])],
//!     lock_time: 0,
//!     input_witnesses: vec![],
//!     output_witnesses: vec![],
//! };
//!
//! let bytes = codec.encode(&tx, EncodeOptions::full()).unwrap();
//! let decoded = codec.decode(&bytes, 0).unwrap();
//! assert_eq!(decoded.transaction, tx);
//! assert_eq!(decoded.vsize, bytes.len() as u64);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod hash;
pub mod serialization;
pub mod types;

// Re-export commonly used types
pub use config::{CodecConfig, EncodeOptions};
pub use error::{CodecError, Result};
pub use hash::{calculate_vsize, calculate_weight, compute_txid, sha256d};
pub use types::*;

/// Transaction codec bound to one decoder configuration
///
/// The codec holds no mutable state; a single instance can serve any number of
/// threads decoding independent buffers.
///
/// # Examples
///
/// ```
/// use ocean_tx::{CodecConfig, OceanCodec};
///
/// let codec = OceanCodec::with_config(CodecConfig {
///     reject_trailing_bytes: true,
///     ..CodecConfig::default()
/// });
/// assert!(codec.decode(&[0x02, 0x00], 0).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct OceanCodec {
    config: CodecConfig,
}

impl OceanCodec {
    /// Codec with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode one transaction starting at `offset`
    ///
    /// Returns the transaction with its id and virtual size.
    pub fn decode(&self, data: &[u8], offset: usize) -> Result<DecodedTransaction> {
        serialization::decode_transaction(data, offset, &self.config)
    }

    /// Encode a transaction, optionally leaving out outputs/lock time or the witness
    pub fn encode(&self, tx: &Transaction, options: EncodeOptions) -> Result<Vec<u8>> {
        serialization::serialize_transaction(tx, options)
    }

    /// Encode only the output count and outputs
    pub fn encode_outputs_only(&self, tx: &Transaction) -> Vec<u8> {
        serialization::serialize_outputs(tx)
    }

    /// Decode a signed block and all of its transactions
    pub fn decode_block(&self, data: &[u8]) -> Result<DecodedBlock> {
        serialization::decode_block(data, &self.config)
    }
}
