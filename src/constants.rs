//! Wire format constants for Elements/Ocean confidential transactions

/// High bit of the serialized previous output index: an issuance follows the input
pub const OUTPOINT_ISSUANCE_FLAG: u32 = 0x8000_0000;

/// Mask applied to the serialized previous output index once the issuance flag is consumed
pub const OUTPOINT_INDEX_MASK: u32 = 0x7fff_ffff;

/// Previous output index of a coinbase-like (null) outpoint
pub const NULL_OUTPOINT_INDEX: u32 = 0xffff_ffff;

/// Transaction flag bit: witness section present
pub const WITNESS_FLAG: u8 = 0x01;

/// Weight of a base (non-witness) byte relative to a witness byte
pub const WITNESS_SCALE_FACTOR: u64 = 4;

/// Tag of an explicit confidential field
pub const EXPLICIT_TAG: u8 = 0x01;

/// Alternate explicit tag accepted for every field kind
pub const EXPLICIT_TAG_ALT: u8 = 0xff;

/// Tag written for an absent (null) confidential field
pub const NULL_TAG: u8 = 0x00;

/// Value commitment tags
pub const VALUE_COMMITMENT_TAGS: [u8; 2] = [0x08, 0x09];

/// Asset generator tags
pub const ASSET_COMMITMENT_TAGS: [u8; 2] = [0x0a, 0x0b];

/// Nonce (ECDH public key) tags
pub const NONCE_COMMITMENT_TAGS: [u8; 2] = [0x02, 0x03];

/// Payload width of an explicit value (big-endian amount)
pub const EXPLICIT_VALUE_SIZE: usize = 8;

/// Payload width of commitments, explicit assets and explicit nonces
pub const COMMITMENT_SIZE: usize = 32;

/// Default upper bound on any decoded count (inputs, outputs, witness stack items)
pub const DEFAULT_MAX_ITEM_COUNT: u64 = 1_000_000;
