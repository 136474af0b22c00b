//! BIP39 reference vectors
//!
//! Entropy, phrase and seed triples from the BIP39 test vectors, all with the
//! passphrase "TREZOR".

#[cfg(test)]
mod tests {
    use crate::{derive_seed, Entropy, Mnemonic};

    const VECTORS: &[(&str, &str, &str)] = &[
        (
            "00000000000000000000000000000000",
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04",
        ),
        (
            "7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f",
            "legal winner thank year wave sausage worth useful legal winner thank yellow",
            "2e8905819b8723fe2c1d161860e5ee1830318dbf49a83bd451cfb8440c28bd6fa457fe1296106559a3c80937a1c1069be3a3a5bd381ee6260e8d9739fce1f607",
        ),
        (
            "80808080808080808080808080808080",
            "letter advice cage absurd amount doctor acoustic avoid letter advice cage above",
            "d71de856f81a8acc65e6fc851a38d4d7ec216fd0796d0a6827a3ad6ed5511a30fa280f12eb2e47ed2ac03b5c462a0358d18d69fe4f985ec81778c1b370b652a8",
        ),
        (
            "ffffffffffffffffffffffffffffffff",
            "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
            "ac27495480225222079d7be181583751e86f571027b0497b5b5d11218e0a8a13332572917f0f8e5a589620c6f15b11c61dee327651a14c34e18231052e48c069",
        ),
        (
            "000000000000000000000000000000000000000000000000",
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon agent",
            "035895f2f481b1b0f01fcf8c289c794660b289981a78f8106447707fdd9666ca06da5a9a565181599b79f53b844d8a71dd9f439c52a3d7b3e8a79c906ac845fa",
        ),
        (
            "0000000000000000000000000000000000000000000000000000000000000000",
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art",
            "bda85446c68413707090a52022edd26a1c9462295029f2e60cd7c4f2bbd3097170af7a4d73245cafa9c3cca8d561a7c3de6f5d4a10be8ed2a5e608d68f92fcc8",
        ),
    ];

    #[test]
    fn test_bip39_vectors() {
        for (entropy_hex, phrase, seed_hex) in VECTORS {
            let entropy = Entropy::from_slice(&hex::decode(entropy_hex).unwrap()).unwrap();
            let mnemonic = Mnemonic::from_entropy(&entropy);
            assert_eq!(&mnemonic.phrase(), phrase);

            let parsed = Mnemonic::from_phrase(phrase).unwrap();
            assert_eq!(parsed, mnemonic);
            assert_eq!(parsed.to_entropy(), entropy);

            assert_eq!(derive_seed(&parsed, "TREZOR").to_hex(), *seed_hex);
        }
    }

    #[test]
    fn test_phrase_words_match_indices() {
        let mnemonic = Mnemonic::from_phrase(VECTORS[1].1).unwrap();
        let words: Vec<&str> = mnemonic.words().collect();
        assert_eq!(words.len(), mnemonic.word_indices().len());
        assert_eq!(words[0], "legal");
        assert_eq!(mnemonic.word_indices()[0], 1019);
    }

    #[test]
    fn test_nfkd_passphrase() {
        // U+00E9 and "e" + U+0301 normalize to the same form
        let mnemonic = Mnemonic::from_phrase(VECTORS[0].1).unwrap();
        assert_eq!(derive_seed(&mnemonic, "caf\u{e9}"), derive_seed(&mnemonic, "cafe\u{301}"));
    }
}
