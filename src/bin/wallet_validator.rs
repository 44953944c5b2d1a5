use clap::Parser;
use eth_wallet_gen::utils::crypto::is_valid_checksum;
use eth_wallet_gen::wallet::to_key_pair;
use eth_wallet_gen::{wallet_from_mnemonic, Mnemonic, WalletRecord};
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// Re-derive wallets printed by `eth-wallet-gen --json` and check them
#[derive(Parser)]
#[command(name = "wallet_validator")]
#[command(version)]
struct Args {
    /// BIP-39 passphrase the wallets were generated with
    #[arg(short, long, default_value = "")]
    passphrase: String,

    /// JSON file with the wallet array (stdin when omitted)
    input: Option<PathBuf>,
}

struct ValidationResult {
    name: String,
    success: bool,
    message: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let payload = if let Some(path) = &args.input {
        fs::read_to_string(path)?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let records: Vec<WalletRecord> = serde_json::from_str(&payload)?;

    let results: Vec<ValidationResult> = records
        .iter()
        .map(|record| {
            run_validation(format!("Wallet[{}]", record.index), || {
                validate_record(record, &args.passphrase)
            })
        })
        .collect();

    println!("================ Wallet Validation ================");
    for result in &results {
        let status = if result.success {
            "✅ PASS"
        } else {
            "❌ FAIL"
        };
        println!("{:<12} {}", result.name, status);
        if !result.success {
            println!("    {}", result.message);
        }
    }

    let overall_success = !results.is_empty() && results.iter().all(|r| r.success);
    println!("===================================================");
    if overall_success {
        println!("Overall status: ✅ {} wallets verified", results.len());
        Ok(())
    } else {
        println!("Overall status: ❌ Validation failed");
        Err("wallet validation failed".into())
    }
}

fn run_validation<F>(name: String, f: F) -> ValidationResult
where
    F: FnOnce() -> Result<(), String>,
{
    match f() {
        Ok(_) => ValidationResult {
            name,
            success: true,
            message: String::new(),
        },
        Err(err) => ValidationResult {
            name,
            success: false,
            message: err,
        },
    }
}

fn validate_record(record: &WalletRecord, passphrase: &str) -> Result<(), String> {
    let mnemonic = Mnemonic::parse(&record.mnemonic).map_err(|e| e.to_string())?;
    let derived = wallet_from_mnemonic(record.index, &mnemonic, passphrase).map_err(|e| e.to_string())?;
    if derived.private_key_hex != record.private_key_hex {
        return Err("Private key does not match m/44'/60'/0'/0/0 of the mnemonic".to_string());
    }

    let mut secret_bytes = [0u8; 32];
    hex::decode_to_slice(&record.private_key_hex, &mut secret_bytes).map_err(|e| e.to_string())?;
    let pair = to_key_pair(&secret_bytes).map_err(|e| e.to_string())?;
    if pair.address().to_string() != record.address {
        return Err("Ethereum checksum address mismatch".to_string());
    }

    if !is_valid_checksum(&record.address) {
        return Err("Address casing is not EIP-55".to_string());
    }

    Ok(())
}
