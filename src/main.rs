//! eth-wallet-gen - batch Ethereum wallet generator

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use eth_wallet_gen::utils::logging;
use eth_wallet_gen::{
    generate_batch, generate_batch_parallel, log_error, BatchConfig, BatchReport, EntropySize,
    FailurePolicy,
};

#[derive(Parser)]
#[command(name = "eth-wallet-gen")]
#[command(about = "Generate BIP-39 Ethereum wallets at m/44'/60'/0'/0/0")]
#[command(version)]
struct Args {
    /// Number of wallets to generate
    #[arg(short, long, default_value_t = 10)]
    count: u32,

    /// Number of words for mnemonic (12, 15, 18, 21, 24)
    #[arg(short, long, default_value_t = 12)]
    words: usize,

    /// Optional BIP-39 passphrase
    #[arg(short, long, default_value = "")]
    passphrase: String,

    /// Keep going when a wallet fails instead of aborting the batch
    #[arg(long)]
    skip_failed: bool,

    /// Generate on this many parallel workers
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Abort the batch after this many seconds (parallel mode)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the wallets as a JSON array
    #[arg(long)]
    json: bool,

    /// Enable progress and debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::set_quiet(!args.verbose);
    if args.verbose {
        logging::enable_debug();
    }

    let config = build_config(&args)?;
    let parallel = args.jobs.is_some() || args.timeout_secs.is_some();

    let report = if parallel {
        generate_batch_parallel(&config).await
    } else {
        generate_batch(&config)
    }
    .context("wallet generation failed")?;

    for failure in &report.failures {
        log_error!("main", "Wallet skipped", index = failure.index, error = failure.error);
    }

    print_report(&report, args.json)
}

fn build_config(args: &Args) -> Result<BatchConfig> {
    let entropy = EntropySize::from_word_count(args.words)
        .with_context(|| format!("unsupported word count {}", args.words))?;

    let mut config = BatchConfig::new(args.count)
        .with_entropy(entropy)
        .with_passphrase(args.passphrase.as_str());
    if args.skip_failed {
        config = config.with_failure_policy(FailurePolicy::SkipFailed);
    }
    if let Some(jobs) = args.jobs {
        config = config.with_jobs(jobs);
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    config.validate()?;
    Ok(config)
}

/// Print the wallets; a batch that produced none is an error in either mode
fn print_report(report: &BatchReport, json: bool) -> Result<()> {
    if report.wallets.is_empty() {
        bail!("no wallets were generated");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report.wallets)?);
        return Ok(());
    }

    for wallet in &report.wallets {
        println!("Wallet[{}]:", wallet.index);
        println!("  Mnemonic: {}", wallet.mnemonic);
        println!("  Address: {}", wallet.address);
        println!("  PrivateKey: {}", wallet.private_key_hex);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eth_wallet_gen::{WalletError, WalletFailure};

    fn all_failed() -> BatchReport {
        BatchReport {
            wallets: Vec::new(),
            failures: vec![WalletFailure {
                index: 0,
                error: WalletError::insufficient_randomness("rng unavailable"),
            }],
        }
    }

    #[test]
    fn test_empty_report_fails_in_both_modes() {
        assert!(print_report(&all_failed(), false).is_err());
        assert!(print_report(&all_failed(), true).is_err());
    }

    #[test]
    fn test_build_config_from_args() {
        let args = Args::parse_from(["eth-wallet-gen", "--count", "3", "--words", "18", "--skip-failed"]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.count, 3);
        assert_eq!(config.options.entropy, EntropySize::Bits192);
        assert_eq!(config.failure_policy, FailurePolicy::SkipFailed);

        let args = Args::parse_from(["eth-wallet-gen", "--words", "13"]);
        assert!(build_config(&args).is_err());
    }
}
