//! BIP-44 Derivation Path
//!
//! The generator derives every wallet at `m/44'/60'/0'/0/0`; the path is
//! kept as data so the HD tree can walk it generically.

/// Standard BIP purposes
pub mod bip_purposes {
    pub const BIP44: u32 = 44;
}

/// Coin types from SLIP-0044
pub mod coin_types {
    pub const ETHEREUM: u32 = 60;
}

/// Hardened offset for BIP-32 derivation
pub const HARDENED: u32 = 0x80000000;

/// Single component of a derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationComponent {
    pub index: u32,
    pub hardened: bool,
}

impl DerivationComponent {
    pub const fn new(index: u32, hardened: bool) -> Self {
        Self { index, hardened }
    }

    pub const fn hardened(index: u32) -> Self {
        Self::new(index, true)
    }

    pub const fn normal(index: u32) -> Self {
        Self::new(index, false)
    }
}

impl std::fmt::Display for DerivationComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

/// Ordered list of derivation steps below the master key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    components: Vec<DerivationComponent>,
}

impl DerivationPath {
    /// `m/44'/60'/0'/0/0`: purpose, coin, account, external chain, first address
    pub fn ethereum() -> Self {
        Self {
            components: vec![
                DerivationComponent::hardened(bip_purposes::BIP44),
                DerivationComponent::hardened(coin_types::ETHEREUM),
                DerivationComponent::hardened(0),
                DerivationComponent::normal(0),
                DerivationComponent::normal(0),
            ],
        }
    }

    pub fn components(&self) -> &[DerivationComponent] {
        &self.components
    }

    pub fn depth(&self) -> usize {
        self.components.len()
    }
}

impl Default for DerivationPath {
    fn default() -> Self {
        Self::ethereum()
    }
}

impl std::fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "m")?;
        for component in &self.components {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}
