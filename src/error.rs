//! Error types for transaction encoding and decoding

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Non-minimal compact length at offset {offset}: value {value} encoded in {width} bytes")]
    InvalidCompactLength {
        offset: usize,
        value: u64,
        width: usize,
    },

    #[error("Malformed confidential {kind} field (tag {tag:#04x}) at offset {offset}: payload needs {needed} bytes, {available} available")]
    MalformedConfidentialField {
        kind: &'static str,
        tag: u8,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Inconsistent witness count: {inputs} inputs / {input_witnesses} input witnesses, {outputs} outputs / {output_witnesses} output witnesses")]
    InconsistentWitnessCount {
        inputs: usize,
        input_witnesses: usize,
        outputs: usize,
        output_witnesses: usize,
    },

    #[error("Invalid previous output index 0xffffffff with non-null previous hash at offset {offset}")]
    InvalidPrevIndex { offset: usize },

    #[error("Length {length} at offset {offset} exceeds the addressable or configured limit")]
    LengthOverflow { offset: usize, length: u64 },

    #[error("{remaining} trailing bytes after transaction ending at offset {offset}")]
    TrailingBytes { offset: usize, remaining: usize },

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CodecError {
    /// Number of bytes missing for a truncation error, zero otherwise
    pub fn shortfall(&self) -> usize {
        match self {
            CodecError::TruncatedInput {
                needed, available, ..
            }
            | CodecError::MalformedConfidentialField {
                needed, available, ..
            } => needed.saturating_sub(*available),
            _ => 0,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
