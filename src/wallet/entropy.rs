//! Entropy Source
//!
//! Fresh randomness from the operating system RNG. A new buffer is drawn
//! for every wallet; nothing is cached or reused.

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::{WalletError, WalletResult};
use crate::types::EntropySize;

/// Raw entropy bytes, zeroized on drop
#[derive(Clone)]
pub struct Entropy(Zeroizing<Vec<u8>>);

impl Entropy {
    /// Wrap caller-supplied bytes after checking the length
    pub fn from_bytes(bytes: &[u8]) -> WalletResult<Self> {
        EntropySize::from_bytes(bytes.len())?;
        Ok(Self(Zeroizing::new(bytes.to_vec())))
    }

    pub fn size(&self) -> EntropySize {
        // Length is checked at construction
        EntropySize::from_bytes(self.0.len()).unwrap_or_default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Entropy {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Entropy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entropy")
            .field("bits", &(self.0.len() * 8))
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Draw entropy of the given standardized size
pub fn generate(size: EntropySize) -> WalletResult<Entropy> {
    let mut buffer = Zeroizing::new(vec![0u8; size.bytes()]);
    OsRng.try_fill_bytes(buffer.as_mut_slice()).map_err(|e| {
        WalletError::insufficient_randomness("Secure random generator unavailable")
            .with_details(e.to_string())
    })?;
    Ok(Entropy(buffer))
}

/// Draw entropy for a raw bit count; only the five BIP39 sizes are accepted
pub fn generate_bits(bits: u32) -> WalletResult<Entropy> {
    generate(EntropySize::try_from(bits)?)
}
