//! Wallet Module
//!
//! Handles entropy, mnemonic encoding, seed stretching, BIP-32 key
//! derivation and Ethereum address generation.

pub mod entropy;
pub mod mnemonic;
pub mod hd_key;
mod keygen;
mod keypair;
mod derivation_path;

pub use derivation_path::*;
pub use entropy::Entropy;
pub use hd_key::{ExtendedPrivateKey, ExtendedPublicKey};
pub use keygen::*;
pub use keypair::*;
pub use mnemonic::{Mnemonic, Seed};

use crate::config::GenerationOptions;
use crate::error::WalletResult;
use crate::types::WalletRecord;

/// Generate one wallet with 128-bit entropy and an empty passphrase
pub fn generate_wallet(index: u32) -> WalletResult<WalletRecord> {
    generate_wallet_with(index, &GenerationOptions::default())
}

/// Generate one wallet with explicit entropy size and passphrase
pub fn generate_wallet_with(index: u32, options: &GenerationOptions) -> WalletResult<WalletRecord> {
    keygen::create_wallet_from_entropy(index, options)
}
