//! Key Generation
//!
//! Creates Ethereum wallets from fresh entropy or an existing mnemonic.
//!
//! SECURITY: entropy, seed and derived scalars are zeroized on drop. Only
//! the returned `WalletRecord` carries secrets out of this module.

use crate::config::GenerationOptions;
use crate::error::WalletResult;
use crate::types::WalletRecord;

use super::derivation_path::DerivationPath;
use super::entropy;
use super::hd_key::ExtendedPrivateKey;
use super::keypair::to_key_pair;
use super::mnemonic::{self, Mnemonic};

/// Create a new wallet from random entropy
pub fn create_wallet_from_entropy(index: u32, options: &GenerationOptions) -> WalletResult<WalletRecord> {
    let entropy = entropy::generate(options.entropy)?;
    let mnemonic = mnemonic::encode(entropy.as_bytes())?;
    wallet_from_mnemonic(index, &mnemonic, &options.passphrase)
}

/// Re-derive the wallet for `mnemonic` at `m/44'/60'/0'/0/0`
pub fn wallet_from_mnemonic(index: u32, mnemonic: &Mnemonic, passphrase: &str) -> WalletResult<WalletRecord> {
    let seed = mnemonic::seed_from_mnemonic(mnemonic, passphrase);
    let master = ExtendedPrivateKey::master(seed.as_bytes())?;
    let account = master.derive_path(&DerivationPath::ethereum())?;
    let pair = to_key_pair(&account.private_key_bytes())?;

    Ok(WalletRecord {
        index,
        mnemonic: mnemonic.phrase().to_string(),
        address: pair.address().to_string(),
        private_key_hex: pair.private_key_hex().to_string(),
    })
}

/// Restore from a phrase string
pub fn restore_wallet(index: u32, phrase: &str, passphrase: &str) -> WalletResult<WalletRecord> {
    let mnemonic = Mnemonic::parse(phrase)?;
    wallet_from_mnemonic(index, &mnemonic, passphrase)
}
