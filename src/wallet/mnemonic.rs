//! Mnemonic Codec (BIP-39)
//!
//! Entropy is encoded into words from the canonical English list, and a
//! mnemonic plus passphrase is stretched into a 64-byte seed with
//! PBKDF2-HMAC-SHA512.
//!
//! SECURITY: word indices, phrases and seeds are zeroized on drop.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use crate::error::{WalletError, WalletResult};
use crate::types::EntropySize;
use crate::utils::crypto::sha256;

use super::entropy::Entropy;

/// PBKDF2 iteration count fixed by BIP-39
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Seed length in bytes
pub const SEED_LEN: usize = 64;

const BITS_PER_WORD: usize = 11;

/// The canonical BIP-39 English word list (2048 entries, sorted)
pub fn english_words() -> &'static [&'static str; 2048] {
    bip39::Language::English.word_list()
}

/// A checksummed BIP-39 mnemonic
///
/// Only produced by [`encode`] or [`Mnemonic::parse`], so the checksum
/// always holds.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    indices: Zeroizing<Vec<u16>>,
}

impl Mnemonic {
    /// Parse a phrase, checking word count, word membership and checksum
    pub fn parse(phrase: &str) -> WalletResult<Self> {
        let normalized: Zeroizing<String> = Zeroizing::new(phrase.nfkd().collect());
        let words: Vec<&str> = normalized.split_whitespace().collect();
        let size = EntropySize::from_word_count(words.len())?;

        let list = english_words();
        let mut indices = Zeroizing::new(Vec::with_capacity(words.len()));
        for (position, word) in words.iter().enumerate() {
            let index = list.binary_search_by(|candidate| str::cmp(candidate, word)).map_err(|_| {
                WalletError::invalid_mnemonic(format!(
                    "Word {} is not in the BIP-39 English list",
                    position + 1
                ))
            })?;
            indices.push(index as u16);
        }

        let mnemonic = Self { indices };
        let (_, checksum_ok) = mnemonic.unpack(size);
        if !checksum_ok {
            return Err(WalletError::invalid_mnemonic("Checksum validation failed"));
        }
        Ok(mnemonic)
    }

    pub fn word_count(&self) -> usize {
        self.indices.len()
    }

    pub fn entropy_size(&self) -> EntropySize {
        // Word count is checked at construction
        EntropySize::from_word_count(self.indices.len()).unwrap_or_default()
    }

    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        let list = english_words();
        self.indices.iter().map(move |&i| list[i as usize])
    }

    /// Space-separated phrase
    pub fn phrase(&self) -> Zeroizing<String> {
        Zeroizing::new(self.words().collect::<Vec<_>>().join(" "))
    }

    /// Rebuild `entropy ‖ checksum` from the word indices.
    ///
    /// Returns the entropy bytes and whether the trailing checksum bits
    /// match SHA-256(entropy).
    fn unpack(&self, size: EntropySize) -> (Zeroizing<Vec<u8>>, bool) {
        let mut buffer = Zeroizing::new(vec![0u8; size.bytes() + 1]);
        for (w, &index) in self.indices.iter().enumerate() {
            for k in 0..BITS_PER_WORD {
                if (index >> (BITS_PER_WORD - 1 - k)) & 1 == 1 {
                    let bit = w * BITS_PER_WORD + k;
                    buffer[bit / 8] |= 0x80 >> (bit % 8);
                }
            }
        }

        let checksum_bits = size.checksum_bits();
        let provided = buffer[size.bytes()] >> (8 - checksum_bits);
        buffer.truncate(size.bytes());
        let expected = sha256(&buffer)[0] >> (8 - checksum_bits);

        (buffer, provided == expected)
    }
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, word) in self.words().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(word)?;
        }
        Ok(())
    }
}

// Never print the phrase through Debug
impl std::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.indices.len())
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

/// 64-byte BIP-39 seed, zeroized on drop
#[derive(Clone)]
pub struct Seed(Zeroizing<[u8; SEED_LEN]>);

impl Seed {
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}

/// Encode entropy as a checksummed mnemonic
pub fn encode(entropy: &[u8]) -> WalletResult<Mnemonic> {
    let size = EntropySize::from_bytes(entropy.len())?;

    // entropy ‖ first checksum byte; at most 8 checksum bits are read
    let mut data = Zeroizing::new(Vec::with_capacity(entropy.len() + 1));
    data.extend_from_slice(entropy);
    data.push(sha256(entropy)[0]);

    let mut indices = Zeroizing::new(Vec::with_capacity(size.word_count()));
    for w in 0..size.word_count() {
        let mut index = 0u16;
        for k in 0..BITS_PER_WORD {
            let bit = w * BITS_PER_WORD + k;
            let value = (data[bit / 8] >> (7 - bit % 8)) & 1;
            index = (index << 1) | value as u16;
        }
        indices.push(index);
    }

    Ok(Mnemonic { indices })
}

/// Recover the exact entropy a mnemonic was encoded from
pub fn decode(mnemonic: &Mnemonic) -> WalletResult<Entropy> {
    let (entropy, checksum_ok) = mnemonic.unpack(mnemonic.entropy_size());
    if !checksum_ok {
        return Err(WalletError::invalid_mnemonic("Checksum validation failed"));
    }
    Entropy::from_bytes(&entropy)
}

/// Stretch a mnemonic and passphrase into the BIP-39 seed
///
/// Both strings are NFKD-normalized; an empty passphrase is valid.
pub fn seed_from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> Seed {
    let password: Zeroizing<String> = Zeroizing::new(mnemonic.phrase().nfkd().collect());
    let salt: Zeroizing<String> =
        Zeroizing::new(format!("mnemonic{}", passphrase.nfkd().collect::<String>()));

    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut seed[..]);
    Seed(seed)
}
