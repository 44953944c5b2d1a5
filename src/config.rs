//! Generation and Batch Configuration
//!
//! Entropy size and passphrase are passed explicitly. The derivation path
//! is not configurable and stays at `m/44'/60'/0'/0/0`.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::error::WalletError;
use crate::types::EntropySize;

/// Upper bound on wallets per batch
pub const MAX_BATCH_SIZE: u32 = 10_000;

/// Wallet count used when none is given
pub const DEFAULT_BATCH_SIZE: u32 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("wallet count must be at least 1")]
    ZeroCount,

    #[error("wallet count {count} exceeds the maximum of {max}")]
    TooManyWallets { count: u32, max: u32 },

    #[error("worker count must be at least 1")]
    ZeroJobs,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

impl From<ConfigError> for WalletError {
    fn from(e: ConfigError) -> Self {
        WalletError::invalid_config(e.to_string())
    }
}

/// What to do when one wallet in a batch fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failure and return it
    #[default]
    AbortAll,
    /// Record the failure and keep going
    SkipFailed,
}

/// Per-wallet generation options
#[derive(Clone, Default)]
pub struct GenerationOptions {
    pub entropy: EntropySize,
    pub passphrase: Zeroizing<String>,
}

impl GenerationOptions {
    pub fn new(entropy: EntropySize) -> Self {
        Self {
            entropy,
            passphrase: Zeroizing::new(String::new()),
        }
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Zeroizing::new(passphrase.into());
        self
    }
}

impl std::fmt::Debug for GenerationOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationOptions")
            .field("entropy_bits", &self.entropy.bits())
            .field("passphrase", &if self.passphrase.is_empty() { "[EMPTY]" } else { "[REDACTED]" })
            .finish()
    }
}

/// Batch orchestration settings
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub count: u32,
    pub options: GenerationOptions,
    pub failure_policy: FailurePolicy,
    /// Concurrent workers for the parallel runner
    pub jobs: usize,
    /// Deadline for the whole batch (parallel runner only)
    pub timeout: Option<Duration>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl BatchConfig {
    pub fn new(count: u32) -> Self {
        Self {
            count,
            options: GenerationOptions::default(),
            failure_policy: FailurePolicy::default(),
            jobs: default_jobs(),
            timeout: None,
        }
    }

    pub fn with_entropy(mut self, entropy: EntropySize) -> Self {
        self.options.entropy = entropy;
        self
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.options = self.options.with_passphrase(passphrase);
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::ZeroCount);
        }
        if self.count > MAX_BATCH_SIZE {
            return Err(ConfigError::TooManyWallets {
                count: self.count,
                max: MAX_BATCH_SIZE,
            });
        }
        if self.jobs == 0 {
            return Err(ConfigError::ZeroJobs);
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

/// JSON form of a batch request; missing fields take their defaults
///
/// ```json
/// { "count": 5, "entropyBits": 256, "passphrase": "", "skipFailed": true }
/// ```
#[derive(Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatchRequest {
    pub count: u32,
    pub entropy_bits: EntropySize,
    pub passphrase: Zeroizing<String>,
    pub skip_failed: bool,
    pub jobs: Option<usize>,
    pub timeout_secs: Option<u64>,
}

impl Default for BatchRequest {
    fn default() -> Self {
        Self {
            count: DEFAULT_BATCH_SIZE,
            entropy_bits: EntropySize::default(),
            passphrase: Zeroizing::new(String::new()),
            skip_failed: false,
            jobs: None,
            timeout_secs: None,
        }
    }
}

impl BatchRequest {
    /// Worker count or deadline given, so the request needs the parallel runner
    pub fn wants_parallel(&self) -> bool {
        self.jobs.is_some() || self.timeout_secs.is_some()
    }

    pub fn into_config(self) -> Result<BatchConfig, ConfigError> {
        let mut config = BatchConfig::new(self.count)
            .with_entropy(self.entropy_bits)
            .with_passphrase(self.passphrase.as_str());
        if self.skip_failed {
            config = config.with_failure_policy(FailurePolicy::SkipFailed);
        }
        if let Some(jobs) = self.jobs {
            config = config.with_jobs(jobs);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config.validate()?;
        Ok(config)
    }
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
