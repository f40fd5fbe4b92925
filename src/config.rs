//! Configuration for the transaction codec
//!
//! Decoding behaviour is controlled by [`CodecConfig`], which can be built
//! programmatically or loaded from JSON. Encoding options are per call and
//! carried by [`EncodeOptions`].

use crate::constants::DEFAULT_MAX_ITEM_COUNT;
use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};

/// Decoder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Reject compact lengths that are not minimally encoded.
    /// Default: true (a non-minimal length cannot round-trip byte-exactly)
    #[serde(default = "default_true")]
    pub strict_compact_length: bool,

    /// Upper bound on input, output and witness stack item counts.
    /// Default: 1,000,000
    #[serde(default = "default_max_item_count")]
    pub max_item_count: u64,

    /// Fail when bytes remain after a transaction decoded from a standalone buffer.
    /// Default: false (block bodies hold transactions back-to-back)
    #[serde(default)]
    pub reject_trailing_bytes: bool,
}

fn default_true() -> bool {
    true
}

fn default_max_item_count() -> u64 {
    DEFAULT_MAX_ITEM_COUNT
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            strict_compact_length: true,
            max_item_count: DEFAULT_MAX_ITEM_COUNT,
            reject_trailing_bytes: false,
        }
    }
}

impl CodecConfig {
    /// Load a configuration from a JSON document; missing keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CodecError::Config(e.to_string()))
    }

    /// Permissive configuration: non-minimal compact lengths are accepted
    pub fn lenient() -> Self {
        Self {
            strict_compact_length: false,
            ..Self::default()
        }
    }
}

/// Options for a full transaction serialization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// Stop after the inputs: omit outputs, lock time and witness data
    #[serde(default)]
    pub skip_output_locktime: bool,

    /// Omit the witness section even when witness data exists
    #[serde(default)]
    pub skip_witness: bool,
}

impl EncodeOptions {
    /// Everything, witness included when present
    pub fn full() -> Self {
        Self::default()
    }

    /// Full transaction without the witness section
    pub fn without_witness() -> Self {
        Self {
            skip_output_locktime: false,
            skip_witness: true,
        }
    }

    /// Version, flag and inputs only
    pub fn inputs_only() -> Self {
        Self {
            skip_output_locktime: true,
            skip_witness: true,
        }
    }
}
