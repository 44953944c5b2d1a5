//! Shared types for the wallet generator
//!
//! All data structures that cross module boundaries are defined here
//! for consistent serialization and FFI compatibility.

use serde::{Deserialize, Serialize};

use crate::error::{WalletError, WalletResult};

// =============================================================================
// Entropy Sizes
// =============================================================================

/// Standardized BIP39 entropy sizes
///
/// Serialized as the bit count (`128`, `160`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum EntropySize {
    /// 128 bits, 12 words
    #[default]
    Bits128,
    /// 160 bits, 15 words
    Bits160,
    /// 192 bits, 18 words
    Bits192,
    /// 224 bits, 21 words
    Bits224,
    /// 256 bits, 24 words
    Bits256,
}

impl EntropySize {
    pub const ALL: [EntropySize; 5] = [
        EntropySize::Bits128,
        EntropySize::Bits160,
        EntropySize::Bits192,
        EntropySize::Bits224,
        EntropySize::Bits256,
    ];

    pub const fn bits(self) -> u32 {
        match self {
            EntropySize::Bits128 => 128,
            EntropySize::Bits160 => 160,
            EntropySize::Bits192 => 192,
            EntropySize::Bits224 => 224,
            EntropySize::Bits256 => 256,
        }
    }

    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Checksum length in bits (one bit per 32 bits of entropy)
    pub const fn checksum_bits(self) -> usize {
        self.bits() as usize / 32
    }

    pub const fn word_count(self) -> usize {
        (self.bits() as usize + self.checksum_bits()) / 11
    }

    pub fn from_bytes(len: usize) -> WalletResult<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.bytes() == len)
            .ok_or_else(|| WalletError::invalid_entropy_length(len * 8))
    }

    pub fn from_word_count(words: usize) -> WalletResult<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.word_count() == words)
            .ok_or_else(|| {
                WalletError::invalid_mnemonic(format!(
                    "Word count must be 12, 15, 18, 21 or 24, got {}",
                    words
                ))
            })
    }
}

impl TryFrom<u32> for EntropySize {
    type Error = WalletError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.bits() == bits)
            .ok_or_else(|| WalletError::invalid_entropy_length(bits as usize))
    }
}

impl From<EntropySize> for u32 {
    fn from(size: EntropySize) -> Self {
        size.bits()
    }
}

// =============================================================================
// Wallet Records
// =============================================================================

/// One generated wallet, handed to the caller and never mutated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    pub index: u32,
    pub mnemonic: String,
    pub address: String,
    pub private_key_hex: String,
}

/// A wallet that failed to generate under `FailurePolicy::SkipFailed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletFailure {
    pub index: u32,
    pub error: WalletError,
}

/// Outcome of a batch run, ordered by index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub wallets: Vec<WalletRecord>,
    pub failures: Vec<WalletFailure>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

// =============================================================================
// API Response Wrapper
// =============================================================================

/// Standard API response wrapper for FFI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<WalletError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: WalletError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"code":"internal","message":"Serialization failed","details":null}}"#.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_entropy_size_properties() {
        let words: Vec<usize> = EntropySize::ALL.iter().map(|s| s.word_count()).collect();
        assert_eq!(words, vec![12, 15, 18, 21, 24]);

        for size in EntropySize::ALL {
            let total_bits = size.bits() as usize + size.checksum_bits();
            assert_eq!(total_bits % 11, 0);
            assert_eq!(EntropySize::from_bytes(size.bytes()).unwrap(), size);
            assert_eq!(EntropySize::from_word_count(size.word_count()).unwrap(), size);
        }
    }

    #[test]
    fn test_entropy_size_rejects_nonstandard() {
        let err = EntropySize::try_from(100).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidEntropyLength);
        assert!(EntropySize::from_bytes(17).is_err());
        assert_eq!(
            EntropySize::from_word_count(13).unwrap_err().code,
            ErrorCode::InvalidMnemonic
        );
    }

    #[test]
    fn test_entropy_size_serde() {
        assert_eq!(serde_json::to_string(&EntropySize::Bits256).unwrap(), "256");
        let size: EntropySize = serde_json::from_str("160").unwrap();
        assert_eq!(size, EntropySize::Bits160);
        assert!(serde_json::from_str::<EntropySize>("64").is_err());
    }

    #[test]
    fn test_wallet_record_field_names() {
        let record = WalletRecord {
            index: 3,
            mnemonic: "abandon about".to_string(),
            address: "0x00".to_string(),
            private_key_hex: "11".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["index"], 3);
        assert_eq!(json["privateKeyHex"], "11");
        assert!(json.get("private_key_hex").is_none());
    }

    #[test]
    fn test_api_response_serialization() {
        let response = ApiResponse::ok("test_data".to_string());
        let json = response.to_json();
        assert!(json.contains("success"));
        assert!(json.contains("test_data"));
    }
}
