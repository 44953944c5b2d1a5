//! Key and Address Conversion
//!
//! Turns a derived 32-byte scalar into a secp256k1 key pair and the
//! corresponding EIP-55 checksummed Ethereum address.

use secp256k1::{PublicKey, SecretKey};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{ErrorCode, WalletError, WalletResult};
use crate::utils::crypto::{is_valid_checksum, keccak256, to_checksum_address, SECP};

/// Signing key plus its public point
#[derive(Clone)]
pub struct KeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl KeyPair {
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// 65 bytes, `0x04 ‖ X ‖ Y`
    pub fn public_uncompressed(&self) -> [u8; 65] {
        self.public.serialize_uncompressed()
    }

    /// 33 bytes, `0x02|0x03 ‖ X`
    pub fn public_compressed(&self) -> [u8; 33] {
        self.public.serialize()
    }

    pub fn address(&self) -> Address {
        to_address(&self.public)
    }

    pub fn private_key_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.secret.secret_bytes()))
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &hex::encode(self.public_compressed()))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// 20-byte Ethereum address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Address([u8; 20]);

impl Address {
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// `0x` + 40 hex digits with EIP-55 casing
    pub fn to_checksum(&self) -> String {
        to_checksum_address(&self.0)
    }

    /// Parse a `0x`-prefixed address. Mixed-case input must carry a valid
    /// EIP-55 checksum; all-lowercase or all-uppercase input is accepted.
    pub fn parse(address: &str) -> WalletResult<Self> {
        let trimmed = address.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .ok_or_else(|| WalletError::new(ErrorCode::HexError, "Address must start with 0x"))?;
        if hex_part.len() != 40 {
            return Err(WalletError::new(
                ErrorCode::HexError,
                "Address must contain 40 hex characters",
            ));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(hex_part, &mut bytes)?;

        let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
        if has_upper && has_lower && !is_valid_checksum(trimmed) {
            return Err(WalletError::new(
                ErrorCode::HexError,
                "Invalid EIP-55 checksum",
            ));
        }

        Ok(Self(bytes))
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_checksum()
    }
}

impl TryFrom<String> for Address {
    type Error = WalletError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Address::parse(&value)
    }
}

/// Validate `1 <= scalar < n` and compute the public point
pub fn to_key_pair(scalar: &[u8; 32]) -> WalletResult<KeyPair> {
    let secret = SecretKey::from_slice(scalar).map_err(|_| {
        WalletError::invalid_private_key("Private scalar is zero or not below the curve order")
    })?;
    let public = PublicKey::from_secret_key(&*SECP, &secret);
    Ok(KeyPair { secret, public })
}

/// Last 20 bytes of Keccak-256 over the 64-byte `X ‖ Y` body
pub fn to_address(public: &PublicKey) -> Address {
    let uncompressed = public.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);

    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    Address(bytes)
}

/// 64 lowercase hex characters, no prefix
pub fn to_private_key_hex(scalar: &[u8; 32]) -> Zeroizing<String> {
    Zeroizing::new(hex::encode(scalar))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVE_ORDER: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

    fn scalar(hex_str: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        hex::decode_to_slice(hex_str, &mut out).unwrap();
        out
    }

    #[test]
    fn test_known_address() {
        // Hardhat / Anvil account #0
        let pair = to_key_pair(&scalar(
            "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        ))
        .unwrap();
        assert_eq!(pair.address().to_string(), "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    }

    #[test]
    fn test_generator_point_address() {
        // k = 1 => public point is G
        let mut one = [0u8; 32];
        one[31] = 1;
        let pair = to_key_pair(&one).unwrap();
        assert_eq!(
            hex::encode(pair.public_compressed()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(pair.address().to_string(), "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf");
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = to_key_pair(&[0u8; 32]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPrivateKey);

        let err = to_key_pair(&scalar(CURVE_ORDER)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPrivateKey);

        let err = to_key_pair(&[0xFF; 32]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPrivateKey);
    }

    #[test]
    fn test_private_key_hex() {
        let mut key = [0u8; 32];
        key[0] = 0xAB;
        key[31] = 0x01;
        let encoded = to_private_key_hex(&key);
        assert_eq!(encoded.len(), 64);
        assert!(encoded.starts_with("ab"));
        assert!(encoded.ends_with("01"));
        assert_eq!(encoded.to_lowercase(), *encoded);
    }

    #[test]
    fn test_uncompressed_prefix_excluded_from_hash() {
        let pair = to_key_pair(&[0x11; 32]).unwrap();
        let uncompressed = pair.public_uncompressed();
        assert_eq!(uncompressed[0], 0x04);

        let hash = keccak256(&uncompressed[1..]);
        assert_eq!(pair.address().as_bytes(), &hash[12..]);
    }

    #[test]
    fn test_address_parse() {
        let addr = "0x9858EfFD232B4033E47d90003D41EC34EcaEda94";
        let parsed = Address::parse(addr).unwrap();
        assert_eq!(parsed.to_string(), addr);

        // Lowercase input carries no checksum and is accepted
        assert_eq!(Address::parse(&addr.to_lowercase()).unwrap(), parsed);

        // Broken casing is rejected
        assert!(Address::parse("0x9858efFD232B4033E47d90003D41EC34EcaEda94").is_err());
        assert!(Address::parse("9858EfFD232B4033E47d90003D41EC34EcaEda94").is_err());
    }

    #[test]
    fn test_address_serde() {
        let address = Address::parse("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
