use eth_wallet_gen::utils::crypto::is_valid_checksum;
use eth_wallet_gen::wallet::hd_key::ExtendedPrivateKey;
use eth_wallet_gen::wallet::mnemonic::{decode, encode, seed_from_mnemonic};
use eth_wallet_gen::{keccak256, to_checksum_address, EntropySize, Mnemonic};
use proptest::prelude::*;

fn any_entropy() -> impl Strategy<Value = Vec<u8>> {
    prop::sample::select(EntropySize::ALL.to_vec())
        .prop_flat_map(|size| prop::collection::vec(any::<u8>(), size.bytes()))
}

fn any_seed() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn mnemonic_roundtrips_entropy(entropy in any_entropy()) {
        let mnemonic = encode(&entropy).unwrap();
        let decoded = decode(&mnemonic).unwrap();
        prop_assert_eq!(decoded.as_bytes(), entropy.as_slice());
    }

    #[test]
    fn word_count_follows_entropy_length(entropy in any_entropy()) {
        let mnemonic = encode(&entropy).unwrap();
        let bits = entropy.len() * 8;
        prop_assert_eq!(mnemonic.word_count(), (bits + bits / 32) / 11);
        prop_assert_eq!(mnemonic.phrase().split(' ').count(), mnemonic.word_count());
    }

    #[test]
    fn printed_phrase_parses_back(entropy in any_entropy()) {
        let mnemonic = encode(&entropy).unwrap();
        let reparsed = Mnemonic::parse(&mnemonic.phrase()).unwrap();
        prop_assert!(reparsed == mnemonic);

        let reencoded = encode(decode(&reparsed).unwrap().as_bytes()).unwrap();
        prop_assert!(reencoded == mnemonic);
    }

    #[test]
    fn public_derivation_matches_private(seed in any_seed(), index in 0u32..0x8000_0000) {
        let master = ExtendedPrivateKey::master(&seed).unwrap();
        let via_private = master.derive_child(index, false).unwrap().to_public();
        let via_public = master.to_public().derive_child(index, false).unwrap();
        prop_assert_eq!(via_private, via_public);
    }

    #[test]
    fn seed_bit_flip_changes_master(seed in any_seed(), bit in 0usize..512) {
        let mut flipped = seed.clone();
        flipped[bit / 8] ^= 1 << (bit % 8);

        let a = ExtendedPrivateKey::master(&seed).unwrap();
        let b = ExtendedPrivateKey::master(&flipped).unwrap();
        prop_assert_ne!(&a.private_key_bytes()[..], &b.private_key_bytes()[..]);
        prop_assert_ne!(a.chain_code(), b.chain_code());
    }

    #[test]
    fn checksum_addresses_roundtrip(bytes in prop::array::uniform20(any::<u8>())) {
        let checksummed = to_checksum_address(&bytes);
        prop_assert!(checksummed.starts_with("0x"));
        prop_assert!(is_valid_checksum(&checksummed));

        let tail = checksummed.trim_start_matches("0x");
        let lower_expected = hex::encode(bytes);
        prop_assert_eq!(tail.to_ascii_lowercase(), lower_expected.clone());

        let hash = keccak256(lower_expected.as_bytes());
        let mut expected = String::from("0x");
        for (i, ch) in lower_expected.chars().enumerate() {
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if ch.is_ascii_digit() || nibble < 8 {
                expected.push(ch);
            } else {
                expected.push(ch.to_ascii_uppercase());
            }
        }
        prop_assert_eq!(checksummed, expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn seed_depends_on_passphrase(entropy in any_entropy(), passphrase in "[a-zA-Z0-9]{1,16}") {
        let mnemonic = encode(&entropy).unwrap();
        let plain = seed_from_mnemonic(&mnemonic, "");
        let protected = seed_from_mnemonic(&mnemonic, &passphrase);
        prop_assert_ne!(&plain.as_bytes()[..], &protected.as_bytes()[..]);
    }
}
