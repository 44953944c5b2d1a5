//! HD Key Tree (BIP-32)
//!
//! Master key construction and child derivation over secp256k1.
//!
//! - Hardened children mix `0x00 ‖ k ‖ ser32(i)` and never touch the
//!   parent public key.
//! - Normal children mix `serP(K) ‖ ser32(i)`, so they can also be derived
//!   from an [`ExtendedPublicKey`] alone.
//! - Out-of-range scalars are reported as errors, never clamped or retried.
//!
//! SECURITY: HMAC output is zeroized after use.

use hmac::{Hmac, Mac};
use secp256k1::{PublicKey, Scalar, SecretKey};
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::error::{WalletError, WalletResult};
use crate::utils::crypto::{hash160, sha256d, SECP};

use super::derivation_path::{DerivationPath, HARDENED};
use super::mnemonic::SEED_LEN;

type HmacSha512 = Hmac<Sha512>;

/// HMAC key for master key generation
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Mainnet serialization versions
const XPRV_VERSION: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4];
const XPUB_VERSION: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];

/// Extended private key: one node of the derivation tree
#[derive(Clone)]
pub struct ExtendedPrivateKey {
    secret: SecretKey,
    chain_code: [u8; 32],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: u32,
}

/// Extended public key: supports non-hardened derivation only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedPublicKey {
    public: PublicKey,
    chain_code: [u8; 32],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: u32,
}

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> WalletResult<Zeroizing<[u8; 64]>> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| WalletError::internal(format!("HMAC init failed: {}", e)))?;
    for part in parts {
        mac.update(part);
    }
    let mut output = Zeroizing::new([0u8; 64]);
    output.copy_from_slice(&mac.finalize().into_bytes());
    Ok(output)
}

fn split_output(output: &[u8; 64]) -> (Zeroizing<[u8; 32]>, [u8; 32]) {
    let mut il = Zeroizing::new([0u8; 32]);
    let mut ir = [0u8; 32];
    il.copy_from_slice(&output[..32]);
    ir.copy_from_slice(&output[32..]);
    (il, ir)
}

/// parse256(IL), rejecting IL >= n
fn parse_tweak(il: &[u8; 32]) -> WalletResult<Scalar> {
    Scalar::from_be_bytes(*il)
        .map_err(|_| WalletError::invalid_child_key("Derived tweak is not below the curve order"))
}

fn checked_index(index: u32, hardened: bool) -> WalletResult<u32> {
    if index >= HARDENED {
        return Err(WalletError::invalid_derivation(format!(
            "Child index must be below 2^31, got {}",
            index
        )));
    }
    Ok(if hardened { index | HARDENED } else { index })
}

fn fingerprint_of(public: &PublicKey) -> [u8; 4] {
    let hash = hash160(&public.serialize());
    [hash[0], hash[1], hash[2], hash[3]]
}

fn base58_check(payload: &[u8]) -> String {
    let checksum = sha256d(payload);
    let mut data = Zeroizing::new(Vec::with_capacity(payload.len() + 4));
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..4]);
    bs58::encode(data.as_slice()).into_string()
}

fn serialize_header(
    version: [u8; 4],
    depth: u8,
    parent_fingerprint: &[u8; 4],
    child_number: u32,
    chain_code: &[u8; 32],
) -> Zeroizing<Vec<u8>> {
    let mut payload = Zeroizing::new(Vec::with_capacity(78));
    payload.extend_from_slice(&version);
    payload.push(depth);
    payload.extend_from_slice(parent_fingerprint);
    payload.extend_from_slice(&child_number.to_be_bytes());
    payload.extend_from_slice(chain_code);
    payload
}

impl ExtendedPrivateKey {
    /// Build the master node from a 64-byte BIP-39 seed
    pub fn master(seed: &[u8]) -> WalletResult<Self> {
        if seed.len() != SEED_LEN {
            return Err(WalletError::invalid_seed_length(seed.len()));
        }
        let output = hmac_sha512(MASTER_HMAC_KEY, &[seed])?;
        Self::master_from_output(&output)
    }

    fn master_from_output(output: &[u8; 64]) -> WalletResult<Self> {
        let (il, chain_code) = split_output(output);
        let secret = SecretKey::from_slice(&il[..]).map_err(|_| {
            WalletError::invalid_master_key("Master scalar is zero or not below the curve order")
        })?;

        Ok(Self {
            secret,
            chain_code,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: 0,
        })
    }

    /// Derive child `index` (hardened when `hardened` is set)
    pub fn derive_child(&self, index: u32, hardened: bool) -> WalletResult<Self> {
        let effective = checked_index(index, hardened)?;
        let index_bytes = effective.to_be_bytes();

        let output = if hardened {
            let secret_bytes = Zeroizing::new(self.secret.secret_bytes());
            let prefix = [0x00u8];
            hmac_sha512(&self.chain_code, &[&prefix[..], &secret_bytes[..], &index_bytes[..]])?
        } else {
            let public = self.public_key().serialize();
            hmac_sha512(&self.chain_code, &[&public[..], &index_bytes[..]])?
        };

        let (il, chain_code) = split_output(&output);
        let secret = self.tweak_secret(&il)?;

        Ok(Self {
            secret,
            chain_code,
            depth: self.next_depth()?,
            parent_fingerprint: self.fingerprint(),
            child_number: effective,
        })
    }

    /// child = parse256(IL) + k (mod n)
    fn tweak_secret(&self, il: &[u8; 32]) -> WalletResult<SecretKey> {
        let tweak = parse_tweak(il)?;
        self.secret
            .add_tweak(&tweak)
            .map_err(|_| WalletError::invalid_child_key("Derived child scalar is zero"))
    }

    fn next_depth(&self) -> WalletResult<u8> {
        self.depth
            .checked_add(1)
            .ok_or_else(|| WalletError::invalid_derivation("Maximum tree depth exceeded"))
    }

    /// Walk every step of `path` starting from this node
    pub fn derive_path(&self, path: &DerivationPath) -> WalletResult<Self> {
        path.components()
            .iter()
            .try_fold(self.clone(), |key, step| key.derive_child(step.index, step.hardened))
    }

    pub fn private_key_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.secret.secret_bytes())
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_secret_key(&*SECP, &self.secret)
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// Effective index including the hardened bit
    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    pub fn is_hardened(&self) -> bool {
        self.child_number & HARDENED != 0
    }

    /// First four bytes of HASH160 of this node's compressed public key
    pub fn fingerprint(&self) -> [u8; 4] {
        fingerprint_of(&self.public_key())
    }

    /// Neuter: drop the private scalar, keep the position metadata
    pub fn to_public(&self) -> ExtendedPublicKey {
        ExtendedPublicKey {
            public: self.public_key(),
            chain_code: self.chain_code,
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_number: self.child_number,
        }
    }

    /// Base58Check `xprv…` serialization
    pub fn to_xprv(&self) -> Zeroizing<String> {
        let mut payload = serialize_header(
            XPRV_VERSION,
            self.depth,
            &self.parent_fingerprint,
            self.child_number,
            &self.chain_code,
        );
        payload.push(0x00);
        payload.extend_from_slice(&self.private_key_bytes()[..]);
        Zeroizing::new(base58_check(&payload))
    }
}

impl std::fmt::Debug for ExtendedPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &self.child_number)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl ExtendedPublicKey {
    /// Derive a non-hardened child from public data only: K_child = IL·G + K
    pub fn derive_child(&self, index: u32, hardened: bool) -> WalletResult<Self> {
        if hardened {
            return Err(WalletError::invalid_derivation(
                "Hardened derivation requires the parent private key",
            ));
        }
        let effective = checked_index(index, false)?;

        let public = self.public.serialize();
        let index_bytes = effective.to_be_bytes();
        let output = hmac_sha512(&self.chain_code, &[&public[..], &index_bytes[..]])?;
        let (il, chain_code) = split_output(&output);

        let tweak = parse_tweak(&il)?;
        let child = self
            .public
            .add_exp_tweak(&*SECP, &tweak)
            .map_err(|_| WalletError::invalid_child_key("Derived child point is at infinity"))?;

        Ok(Self {
            public: child,
            chain_code,
            depth: self
                .depth
                .checked_add(1)
                .ok_or_else(|| WalletError::invalid_derivation("Maximum tree depth exceeded"))?,
            parent_fingerprint: self.fingerprint(),
            child_number: effective,
        })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    pub fn fingerprint(&self) -> [u8; 4] {
        fingerprint_of(&self.public)
    }

    /// Base58Check `xpub…` serialization
    pub fn to_xpub(&self) -> String {
        let mut payload = serialize_header(
            XPUB_VERSION,
            self.depth,
            &self.parent_fingerprint,
            self.child_number,
            &self.chain_code,
        );
        payload.extend_from_slice(&self.public.serialize());
        base58_check(&payload)
    }
}

/// BIP-32 master key from a 64-byte seed
pub fn master_key(seed: &[u8]) -> WalletResult<ExtendedPrivateKey> {
    ExtendedPrivateKey::master(seed)
}

/// BIP-32 private child derivation
pub fn derive_child(
    parent: &ExtendedPrivateKey,
    index: u32,
    hardened: bool,
) -> WalletResult<ExtendedPrivateKey> {
    parent.derive_child(index, hardened)
}
