#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::cli::OutputFormat;
use crate::error::get_error_info;
use crate::types::{DeploymentResult, StorageExpression};
use crate::DeployError;
use serde_json::{json, Value};
use std::path::Path;
use url::Url;

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[must_use]
pub fn result_envelope(result: &DeploymentResult, t: i64) -> Value {
    match result {
        DeploymentResult::Deployed { address } => json!({
            "ok": true,
            "t": t,
            "d": { "address": address },
        }),
        DeploymentResult::Failed { kind, message } => {
            let code = kind.code();
            json!({
                "ok": false,
                "t": t,
                "err": {
                    "code": code,
                    "kind": kind,
                    "msg": message,
                    "fix": get_error_info(code).map(|(_, fix)| fix),
                },
            })
        }
    }
}

#[must_use]
pub fn error_envelope(error: &DeployError, t: i64) -> Value {
    let code = error.code();
    json!({
        "ok": false,
        "t": t,
        "err": {
            "code": code,
            "msg": error.to_string(),
            "fix": get_error_info(code).map(|(_, fix)| fix),
        },
    })
}

#[must_use]
pub fn dry_run_envelope(endpoint: &Url, artifact: &Path, storage: &StorageExpression, t: i64) -> Value {
    json!({
        "ok": true,
        "t": t,
        "d": {
            "dry_run": true,
            "endpoint": endpoint.as_str(),
            "artifact": artifact.display().to_string(),
            "storage": storage.as_str(),
        },
    })
}

/// Prints the final result. Text mode only adds a line on failure since the
/// deployer already reported success.
pub fn emit_result(output: OutputFormat, result: &DeploymentResult) {
    match output {
        OutputFormat::Text => {
            if let DeploymentResult::Failed { message, .. } = result {
                println!("Deployment failed: {message}");
            }
        }
        OutputFormat::Json => println!("{}", result_envelope(result, now_ms())),
    }
}

pub fn emit_error(output: OutputFormat, error: &DeployError) {
    match output {
        OutputFormat::Text => {
            eprintln!("Error: {error}");
            if let Some((_, fix)) = get_error_info(error.code()) {
                eprintln!("  fix: {fix}");
            }
        }
        OutputFormat::Json => println!("{}", error_envelope(error, now_ms())),
    }
}

pub fn emit_dry_run(output: OutputFormat, endpoint: &Url, artifact: &Path, storage: &StorageExpression) {
    match output {
        OutputFormat::Text => {
            println!("Endpoint: {endpoint}");
            println!("Artifact: {}", artifact.display());
            println!("Storage:  {storage}");
            println!("Dry run: nothing was originated");
        }
        OutputFormat::Json => println!(
            "{}",
            dry_run_envelope(endpoint, artifact, storage, now_ms())
        ),
    }
}
