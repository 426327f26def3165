#![allow(missing_docs)]

use std::sync::Arc;

use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use tempdir::TempDir;
use tokchain::{
    chain::{Chain, ChainOptions, ContextCase, Crc32Hasher, GenerateOptions, OrderWeighting},
    errors::TokchainError,
    tokenizer::{Tokenizer, presets},
};

fn tokenizer() -> Arc<Tokenizer> {
    Arc::new(presets::simple_english().unwrap())
}

#[test]
fn test_save_load() {
    let dir = TempDir::new("tokchain").unwrap();
    let path = dir.path().join("model.bin");

    let options = ChainOptions::default()
        .with_order(3)
        .with_weighting(OrderWeighting::ByOrder);
    let mut chain = Chain::new(tokenizer(), options).unwrap();
    chain.train_samples(["one fish, two fish.", "red fish, blue fish!"]);
    chain.save(&path).unwrap();

    let loaded = Chain::load(&path, tokenizer(), Crc32Hasher).unwrap();
    assert_eq!(loaded.options(), &options);
    assert_eq!(loaded.table(), chain.table());

    let generate = |chain: &Chain| {
        chain
            .generate_text(
                GenerateOptions::default().with_max_length(20),
                &mut StdRng::seed_from_u64(4),
            )
            .unwrap()
    };
    assert_eq!(generate(&loaded), generate(&chain));
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new("tokchain").unwrap();
    let err = Chain::load(dir.path().join("nope.bin"), tokenizer(), Crc32Hasher).unwrap_err();
    assert!(matches!(err, TokchainError::Io(_)));
}

#[test]
fn test_load_garbage() {
    let err = Chain::from_bytes(tokenizer(), b"\xff\xff\xff", Crc32Hasher).unwrap_err();
    assert!(matches!(err, TokchainError::Serialization(_)));
}

#[test]
fn test_merged_partials_equal_whole() {
    let samples = ["a b c", "b c d", "c d e", "a c e"];

    let mut whole = Chain::new(tokenizer(), ChainOptions::default()).unwrap();
    whole.train_samples(samples);

    let mut left = Chain::new(tokenizer(), ChainOptions::default()).unwrap();
    left.train_samples(&samples[..2]);
    let mut right = Chain::new(tokenizer(), ChainOptions::default()).unwrap();
    right.train_samples(&samples[2..]);
    left.merge(&right).unwrap();

    assert_eq!(left.table(), whole.table());
}

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,6}( [a-z]{1,6}){0,8}[.!?]?", 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bytes_roundtrip_is_exact(
        corpus in corpus_strategy(),
        order in 1..5usize,
        verbatim in any::<bool>(),
    ) {
        let context_case = if verbatim { ContextCase::Verbatim } else { ContextCase::Folded };
        let options = ChainOptions::default()
            .with_order(order)
            .with_context_case(context_case);

        let mut chain = Chain::new(tokenizer(), options).unwrap();
        chain.train_samples(&corpus);

        let bytes = chain.to_bytes().unwrap();
        let loaded = Chain::from_bytes(tokenizer(), &bytes, Crc32Hasher).unwrap();

        prop_assert_eq!(loaded.options(), chain.options());
        prop_assert_eq!(loaded.context_count(), chain.context_count());
        for (key, counts) in chain.table().iter() {
            prop_assert_eq!(loaded.table().get(key), Some(counts));
        }
        prop_assert_eq!(loaded.to_bytes().unwrap().len(), bytes.len());
    }
}
