//! Ethereum Wallet Generator
//!
//! Creates standalone Ethereum wallets the way hardware and browser wallets
//! do: BIP-39 mnemonic, PBKDF2 seed, BIP-32 key tree at `m/44'/60'/0'/0/0`,
//! secp256k1 key pair and EIP-55 checksummed address.
//!
//! # Architecture
//!
//! This crate provides:
//! - **wallet**: Entropy, mnemonic codec, HD key tree, addresses
//! - **batch**: Sequential and parallel multi-wallet generation
//! - **config**: Generation and batch options
//! - **ffi**: C-ABI exports
//!
//! # FFI Usage
//!
//! All public FFI functions are in the `ffi` module and follow this pattern:
//! - Input: JSON string (null-terminated C string)
//! - Output: JSON string (must be freed with `ethgen_free_string`)
//!
//! # Security
//!
//! This crate uses `zeroize` to securely clear sensitive data from memory.
//! Entropy, seeds and private scalars are automatically zeroed when dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use eth_wallet_gen::generate_wallet;
//!
//! let wallet = generate_wallet(0)?;
//! println!("Address: {}", wallet.address);
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod utils;
pub mod wallet;
pub mod batch;
pub mod ffi;

// Re-export key types for convenience
pub use error::{ErrorCode, WalletError, WalletResult};
pub use types::*;
pub use config::{BatchConfig, BatchRequest, ConfigError, FailurePolicy, GenerationOptions};

pub use wallet::{
    generate_wallet,
    generate_wallet_with,
    wallet_from_mnemonic,
    restore_wallet,
    Address,
    DerivationPath,
    Mnemonic,
};

pub use batch::{generate_batch, generate_batch_parallel};

pub use utils::crypto::{keccak256, to_checksum_address};

pub use ffi::{ethgen_free_string, ethgen_generate_wallets};
