//! Decoding with a tracing subscriber installed must not change results

use ocean_tx::serialization::*;
use ocean_tx::*;
use tracing_subscriber::EnvFilter;

fn sample() -> Transaction {
    Transaction {
        version: 2,
        flag: 1,
        inputs: vec![TransactionInput {
            prevout: OutPoint { hash: [0x11; 32], index: 3 },
            script_sig: vec![],
            sequence: 0xffffffff,
            issuance: None,
        }],
        outputs: vec![TransactionOutput::explicit([0x25; 32], 5_000, vec![0x51])],
        lock_time: 0,
        input_witnesses: vec![TxInWitness {
            script_witness: vec![vec![0x30; 72], vec![0x03; 33]],
            ..TxInWitness::default()
        }],
        output_witnesses: vec![TxOutWitness::default()],
    }
}

#[test]
fn test_decode_under_trace_subscriber() {
    let bytes = serialize_transaction(&sample(), EncodeOptions::full()).unwrap();
    let quiet = deserialize_transaction(&bytes).unwrap();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("ocean_tx=trace"))
        .with_test_writer()
        .finish();
    let traced = tracing::subscriber::with_default(subscriber, || {
        deserialize_transaction(&bytes).unwrap()
    });

    assert_eq!(traced, quiet);
}

#[test]
fn test_failed_decode_under_trace_subscriber() {
    let bytes = serialize_transaction(&sample(), EncodeOptions::full()).unwrap();
    let truncated = &bytes[..bytes.len() - 1];

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("ocean_tx=debug"))
        .with_test_writer()
        .finish();
    let err = tracing::subscriber::with_default(subscriber, || {
        deserialize_transaction(truncated).unwrap_err()
    });

    assert_eq!(err, deserialize_transaction(truncated).unwrap_err());
}
