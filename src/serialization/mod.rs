//! Elements/Ocean wire format serialization/deserialization
//!
//! All fixed-width integers are little-endian. Counts and byte-string lengths
//! use the compact length encoding. Decoding walks a [`cursor::Cursor`] over a
//! borrowed buffer and copies payloads out, so decoded records never borrow
//! from the input.

pub mod block;
pub mod confidential;
pub mod cursor;
pub mod transaction;
pub mod varint;
pub mod witness;

pub use block::{
    block_hash, decode_block, decode_block_header, deserialize_block_header,
    serialize_block_header,
};
pub use confidential::{
    decode_confidential, deserialize_confidential, encode_confidential, serialize_confidential,
};
pub use cursor::Cursor;
pub use transaction::{
    decode_transaction, deserialize_transaction, serialize_for_txid, serialize_outputs,
    serialize_transaction,
};
pub use varint::{decode_varint, decode_varint_at, encode_varint, varint_size, write_varint};
pub use witness::{
    decode_input_witness, decode_output_witness, encode_input_witness, encode_output_witness,
};
