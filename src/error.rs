//! Unified error types for the wallet generator
//!
//! Every core operation returns a `WalletError` carrying one of the
//! `ErrorCode` kinds below. The core never retries and never logs; the
//! caller decides what a failure means for the batch.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for all generation operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl WalletError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn insufficient_randomness(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InsufficientRandomness, msg)
    }

    pub fn invalid_entropy_length(len_bits: usize) -> Self {
        Self::new(
            ErrorCode::InvalidEntropyLength,
            format!("Entropy must be 128, 160, 192, 224 or 256 bits, got {}", len_bits),
        )
    }

    pub fn invalid_seed_length(len: usize) -> Self {
        Self::new(
            ErrorCode::InvalidSeedLength,
            format!("Seed must be 64 bytes, got {}", len),
        )
    }

    pub fn invalid_master_key(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidMasterKey, msg)
    }

    pub fn invalid_child_key(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidChildKey, msg)
    }

    pub fn invalid_private_key(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPrivateKey, msg)
    }

    pub fn invalid_mnemonic(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidMnemonic, msg)
    }

    pub fn invalid_derivation(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidDerivation, msg)
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, msg)
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Timeout, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for WalletError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Generation pipeline
    InsufficientRandomness,
    InvalidEntropyLength,
    InvalidSeedLength,
    InvalidMasterKey,
    InvalidChildKey,
    InvalidPrivateKey,

    // Input errors
    InvalidMnemonic,
    InvalidDerivation,
    InvalidConfig,

    // Orchestration
    Timeout,

    // Parse errors
    JsonError,
    HexError,

    // Internal
    Internal,
}

/// Result type alias for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;

// Conversions from common error types

impl From<serde_json::Error> for WalletError {
    fn from(e: serde_json::Error) -> Self {
        WalletError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<hex::FromHexError> for WalletError {
    fn from(e: hex::FromHexError) -> Self {
        WalletError::new(ErrorCode::HexError, e.to_string())
    }
}

impl From<tokio::task::JoinError> for WalletError {
    fn from(e: tokio::task::JoinError) -> Self {
        WalletError::new(ErrorCode::Internal, format!("Worker task failed: {}", e))
    }
}
