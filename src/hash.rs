//! Transaction id, weight and virtual size
//!
//! TxId(tx) = SHA256(SHA256(Serialize(tx ∖ witness) with flag = 0))
//! Weight(tx) = 3 × |base| + |full|
//! VSize(tx) = ⌈Weight(tx) / 4⌉

use crate::constants::WITNESS_SCALE_FACTOR;
use crate::serialization::transaction::serialize_for_txid;
use crate::types::{Hash, Transaction, TxId};
use bitcoin_hashes::{sha256d, Hash as BitcoinHash};

/// Double SHA-256
pub fn sha256d(data: &[u8]) -> Hash {
    sha256d::Hash::hash(data).into_inner()
}

/// Transaction id recomputed from the model
///
/// Matches the id produced by the single-pass decoder for the same transaction.
pub fn compute_txid(tx: &Transaction) -> TxId {
    TxId(sha256d(&serialize_for_txid(tx)))
}

/// Weight = (scale - 1) × base + full
///
/// `full_size` already contains the base bytes once, so each base byte ends up
/// counted `WITNESS_SCALE_FACTOR` times and each witness byte once.
pub fn calculate_weight(base_size: usize, full_size: usize) -> u64 {
    (WITNESS_SCALE_FACTOR - 1) * base_size as u64 + full_size as u64
}

/// Virtual size: weight divided by the scale factor, rounded up
pub fn calculate_vsize(base_size: usize, full_size: usize) -> u64 {
    let weight = calculate_weight(base_size, full_size);
    (weight + WITNESS_SCALE_FACTOR - 1) / WITNESS_SCALE_FACTOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256d_empty() {
        // SHA256d("") = 5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456
        let hash = sha256d(&[]);
        assert_eq!(hash[0], 0x5d);
        assert_eq!(hash[1], 0xf6);
        assert_eq!(hash[31], 0x56);
    }

    #[test]
    fn test_vsize_rounds_up() {
        assert_eq!(calculate_weight(100, 140), 440);
        assert_eq!(calculate_vsize(100, 140), 110);
        assert_eq!(calculate_vsize(100, 141), 111);
        assert_eq!(calculate_vsize(182, 223), 193);
    }

    #[test]
    fn test_vsize_without_witness_is_size() {
        assert_eq!(calculate_vsize(130, 130), 130);
        assert_eq!(calculate_vsize(0, 0), 0);
    }
}
