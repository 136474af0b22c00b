//! Entropy codec and mnemonic property tests

use assert_matches::assert_matches;
use cardano_key_wallet::entropy::ENTROPY_SIZES;
use cardano_key_wallet::{encode_entropy, Entropy, Error, Mnemonic};
use proptest::prelude::*;

fn entropy_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::sample::select(ENTROPY_SIZES.to_vec())
        .prop_flat_map(|len| prop::collection::vec(any::<u8>(), len))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn entropy_roundtrip(bytes in entropy_strategy()) {
        let mut indices = [0u16; 24];
        let written = encode_entropy(&bytes, &mut indices).unwrap();
        prop_assert_eq!(written, bytes.len() * 3 / 4);
        prop_assert!(indices[..written].iter().all(|&i| i < 2048));

        let decoded = Entropy::from_word_indices(&indices[..written]).unwrap();
        prop_assert_eq!(decoded.as_bytes(), &bytes[..]);
    }

    #[test]
    fn checksum_bit_flip_is_detected(bytes in entropy_strategy(), bit in 0usize..4) {
        let entropy = Entropy::from_slice(&bytes).unwrap();
        let mut indices = entropy.to_word_indices();
        let last = indices.len() - 1;
        // the low ENT/32 bits of the last word are checksum, at least 4 of them
        indices[last] ^= 1 << bit;
        prop_assert_eq!(Entropy::from_word_indices(&indices), Err(Error::ChecksumMismatch));
    }

    #[test]
    fn phrase_roundtrip(bytes in entropy_strategy()) {
        let mnemonic = Mnemonic::from_entropy_bytes(&bytes).unwrap();
        let parsed = Mnemonic::from_phrase(&mnemonic.phrase()).unwrap();
        let entropy = parsed.to_entropy();
        prop_assert_eq!(entropy.as_bytes(), &bytes[..]);
    }

    #[test]
    fn codec_agrees_with_bip39_crate(bytes in entropy_strategy()) {
        let reference = bip39::Mnemonic::from_entropy(&bytes).unwrap();
        let mut indices = [0u16; 24];
        let written = encode_entropy(&bytes, &mut indices).unwrap();
        let expected: Vec<u16> = reference.word_indices().map(|i| i as u16).collect();
        prop_assert_eq!(&indices[..written], &expected[..]);

        let mnemonic = Mnemonic::from_entropy_bytes(&bytes).unwrap();
        prop_assert_eq!(mnemonic.phrase(), reference.to_string());
        let seed = mnemonic.to_seed("");
        prop_assert_eq!(seed.as_bytes(), &reference.to_seed(""));
    }

    #[test]
    fn undersized_buffer_is_rejected(bytes in entropy_strategy()) {
        let required = bytes.len() * 3 / 4;
        let mut indices = vec![0u16; required - 1];
        prop_assert_eq!(
            encode_entropy(&bytes, &mut indices),
            Err(Error::BufferTooSmall { required, capacity: required - 1 })
        );
    }
}

#[test]
fn test_invalid_entropy_sizes() {
    let mut out = [0u16; 24];
    for len in [0usize, 1, 15, 17, 31, 33, 64] {
        assert_matches!(
            encode_entropy(&vec![0u8; len], &mut out),
            Err(Error::InvalidEntropySize(l)) if l == len
        );
    }
}

#[test]
fn test_word_counts() {
    for (len, words) in [(16usize, 12usize), (20, 15), (24, 18), (28, 21), (32, 24)] {
        let mnemonic = Mnemonic::from_entropy_bytes(&vec![0x5a; len]).unwrap();
        assert_eq!(mnemonic.word_count(), words);
        assert_eq!(mnemonic.phrase().split(' ').count(), words);
    }
}

#[test]
fn test_invalid_phrases() {
    let invalid = [
        "",
        "abandon abandon abandon",
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon",
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon",
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abou",
    ];
    for phrase in invalid {
        assert!(!Mnemonic::validate(phrase), "{}", phrase);
    }
}
