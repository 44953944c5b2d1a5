//! Batch Generation
//!
//! Runs the single-wallet pipeline for indices `0..count`, either
//! sequentially or on a bounded pool of blocking workers. Output is always
//! ordered by index.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::config::{BatchConfig, FailurePolicy};
use crate::error::{WalletError, WalletResult};
use crate::types::{BatchReport, WalletFailure, WalletRecord};
use crate::wallet::generate_wallet_with;
use crate::{log_debug, log_info, log_warn};

const MODULE: &str = "batch";

/// Generate `config.count` wallets one after another
pub fn generate_batch(config: &BatchConfig) -> WalletResult<BatchReport> {
    config.validate()?;
    log_info!(MODULE, "Starting batch", count = config.count, words = config.options.entropy.word_count());

    let mut report = BatchReport::default();
    for index in 0..config.count {
        let outcome = generate_wallet_with(index, &config.options);
        record_outcome(&mut report, index, outcome, config.failure_policy)?;
    }

    log_batch_done(&report);
    Ok(report)
}

/// Generate `config.count` wallets on up to `config.jobs` blocking workers,
/// failing with `Timeout` if the batch exceeds `config.timeout`
pub async fn generate_batch_parallel(config: &BatchConfig) -> WalletResult<BatchReport> {
    config.validate()?;
    log_info!(
        MODULE,
        "Starting parallel batch",
        count = config.count,
        jobs = config.jobs,
        words = config.options.entropy.word_count(),
    );

    let report = match config.timeout {
        Some(limit) => tokio::time::timeout(limit, run_workers(config))
            .await
            .map_err(|_| {
                log_warn!(MODULE, "Batch timed out", timeout_ms = limit.as_millis());
                WalletError::timeout(format!("Batch did not finish within {:?}", limit))
            })??,
        None => run_workers(config).await?,
    };

    log_batch_done(&report);
    Ok(report)
}

async fn run_workers(config: &BatchConfig) -> WalletResult<BatchReport> {
    let semaphore = Arc::new(Semaphore::new(config.jobs));
    let options = Arc::new(config.options.clone());

    let mut handles = Vec::with_capacity(config.count as usize);
    for index in 0..config.count {
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .map_err(|_| WalletError::internal("Worker pool closed"))?;
        let options = Arc::clone(&options);
        handles.push((
            index,
            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                generate_wallet_with(index, &options)
            }),
        ));
    }

    let mut report = BatchReport::default();
    for (index, handle) in handles {
        let outcome = handle.await?;
        record_outcome(&mut report, index, outcome, config.failure_policy)?;
    }
    Ok(report)
}

/// Apply the failure policy to one wallet result
fn record_outcome(
    report: &mut BatchReport,
    index: u32,
    outcome: WalletResult<WalletRecord>,
    policy: FailurePolicy,
) -> WalletResult<()> {
    match outcome {
        Ok(record) => {
            log_debug!(MODULE, "Wallet generated", index = index, address = record.address);
            report.wallets.push(record);
            Ok(())
        }
        Err(error) => match policy {
            FailurePolicy::AbortAll => {
                log_warn!(MODULE, "Wallet failed, aborting batch", index = index, code = format!("{:?}", error.code));
                Err(error)
            }
            FailurePolicy::SkipFailed => {
                log_warn!(MODULE, "Wallet failed, skipping", index = index, code = format!("{:?}", error.code));
                report.failures.push(WalletFailure { index, error });
                Ok(())
            }
        },
    }
}

fn log_batch_done(report: &BatchReport) {
    log_info!(
        MODULE,
        "Batch finished",
        generated = report.wallets.len(),
        failed = report.failures.len(),
    );
}
