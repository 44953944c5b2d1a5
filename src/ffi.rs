//! FFI Exports
//!
//! C-ABI functions for embedding the generator in other runtimes.
//! All functions use JSON for input/output:
//! - Input: JSON string (null-terminated C string)
//! - Output: JSON string (must be freed with `ethgen_free_string`)
//!
//! Error handling: All functions return JSON with `success` field.
//! On error, `success: false` and `error` object is populated.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use crate::batch;
use crate::config::{BatchConfig, BatchRequest};
use crate::error::{WalletError, WalletResult};
use crate::types::*;

// =============================================================================
// Memory Management
// =============================================================================

/// Free a string returned by any ethgen_* function
///
/// # Safety
/// The pointer must have been returned by this library and not freed yet.
#[unsafe(no_mangle)]
pub extern "C" fn ethgen_free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    unsafe {
        let _ = CString::from_raw(s);
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Convert C string to Rust string, returning error JSON if invalid
fn parse_input<'a>(input: *const c_char) -> Result<&'a str, *mut c_char> {
    if input.is_null() {
        return Err(error_response(WalletError::invalid_config("Null input pointer")));
    }

    let c_str = unsafe { CStr::from_ptr(input) };
    c_str
        .to_str()
        .map_err(|_| error_response(WalletError::invalid_config("Invalid UTF-8 string")))
}

fn success_response<T: serde::Serialize>(data: T) -> *mut c_char {
    let response = ApiResponse::ok(data);
    string_to_ptr(response.to_json())
}

fn error_response(error: WalletError) -> *mut c_char {
    let response: ApiResponse<()> = ApiResponse::err(error);
    string_to_ptr(response.to_json())
}

fn string_to_ptr(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c_str) => c_str.into_raw(),
        Err(_) => {
            let fallback: &[u8] = b"{\"success\":false,\"error\":{\"code\":\"internal\",\"message\":\"String conversion failed\"}}\0";
            match CStr::from_bytes_with_nul(fallback) {
                Ok(c_str) => c_str.to_owned().into_raw(),
                Err(_) => std::ptr::null_mut(),
            }
        }
    }
}

// =============================================================================
// Wallet Generation
// =============================================================================

/// Generate a batch of Ethereum wallets
///
/// # Input
/// ```json
/// {
///   "count": 10,
///   "entropyBits": 128,
///   "passphrase": "",
///   "skipFailed": false,
///   "jobs": 4,
///   "timeoutSecs": 30
/// }
/// ```
/// Every field is optional; `{}` produces ten 12-word wallets. Setting
/// `jobs` or `timeoutSecs` runs the batch on parallel workers, and an
/// expired deadline returns a `timeout` error.
///
/// # Output
/// ```json
/// {
///   "success": true,
///   "data": {
///     "wallets": [{ "index": 0, "mnemonic": "...", "address": "0x...", "privateKeyHex": "..." }],
///     "failures": []
///   }
/// }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn ethgen_generate_wallets(json_config: *const c_char) -> *mut c_char {
    let json_str = match parse_input(json_config) {
        Ok(s) => s,
        Err(e) => return e,
    };

    let request: BatchRequest = match serde_json::from_str(json_str) {
        Ok(r) => r,
        Err(e) => return error_response(WalletError::from(e)),
    };

    let parallel = request.wants_parallel();
    let config = match request.into_config() {
        Ok(c) => c,
        Err(e) => return error_response(e.into()),
    };

    let result = if parallel {
        run_parallel(&config)
    } else {
        batch::generate_batch(&config)
    };

    match result {
        Ok(report) => success_response(report),
        Err(e) => error_response(e),
    }
}

/// Drive the parallel runner on a runtime owned by this call
fn run_parallel(config: &BatchConfig) -> WalletResult<BatchReport> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| WalletError::internal(format!("Failed to start runtime: {}", e)))?;

    let result = runtime.block_on(batch::generate_batch_parallel(config));

    // Workers cut off by a timeout finish in the background
    runtime.shutdown_background();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn call(input: &str) -> Value {
        let c_input = CString::new(input).unwrap();
        let ptr = ethgen_generate_wallets(c_input.as_ptr());
        assert!(!ptr.is_null());
        let out = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
        ethgen_free_string(ptr);
        serde_json::from_str(&out).unwrap()
    }

    #[test]
    fn test_generate_wallets() {
        let response = call(r#"{"count":2,"entropyBits":160}"#);
        assert_eq!(response["success"], true);

        let wallets = response["data"]["wallets"].as_array().unwrap();
        assert_eq!(wallets.len(), 2);
        assert_eq!(wallets[1]["index"], 1);
        assert_eq!(wallets[0]["mnemonic"].as_str().unwrap().split_whitespace().count(), 15);
        assert!(wallets[0]["address"].as_str().unwrap().starts_with("0x"));
        assert_eq!(wallets[0]["privateKeyHex"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_generate_wallets_parallel() {
        let response = call(r#"{"count":4,"jobs":2,"timeoutSecs":120}"#);
        assert_eq!(response["success"], true);

        let indices: Vec<u64> = response["data"]["wallets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["index"].as_u64().unwrap())
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_generate_wallets_honours_timeout() {
        let started = std::time::Instant::now();
        let response = call(r#"{"count":2000,"jobs":1,"timeoutSecs":1}"#);
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "timeout");
        assert!(started.elapsed() < std::time::Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_json() {
        let response = call("not json");
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "json_error");
    }

    #[test]
    fn test_invalid_config() {
        let response = call(r#"{"count":0}"#);
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "invalid_config");
    }

    #[test]
    fn test_null_input() {
        let ptr = ethgen_generate_wallets(std::ptr::null());
        let out = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
        ethgen_free_string(ptr);
        let response: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(response["success"], false);
    }

    #[test]
    fn test_free_null_is_noop() {
        ethgen_free_string(std::ptr::null_mut());
    }
}
