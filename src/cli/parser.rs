#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::action::{CliAction, DeployArgs, OutputFormat};
use crate::config::ConfigOverrides;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    #[error("Missing required argument: {}", arg)]
    MissingRequiredArg { arg: String },
    #[error("Unknown flag: {}", flag)]
    UnknownFlag { flag: String },
    #[error("Unexpected argument: {}", arg)]
    UnexpectedArg { arg: String },
    #[error("Invalid argument value for {}: {}", arg, error)]
    InvalidArgValue { arg: String, error: String },
}

/// Parses the arguments that follow the program name.
///
/// # Errors
/// Returns a `CliError` for unknown flags, missing values, a second positional
/// argument, or a missing network.
pub fn parse_cli_args(args: &[String]) -> Result<CliAction, CliError> {
    if args.iter().any(|arg| matches!(arg.as_str(), "-h" | "--help")) {
        return Ok(CliAction::ShowHelp);
    }
    if args.iter().any(|arg| matches!(arg.as_str(), "-v" | "--version")) {
        return Ok(CliAction::ShowVersion);
    }

    let mut network = None;
    let mut overrides = ConfigOverrides::default();
    let mut output = OutputFormat::Text;
    let mut dry_run = false;

    let mut tokens = args.iter();
    while let Some(token) = tokens.next() {
        if !token.starts_with('-') {
            if network.is_some() {
                return Err(CliError::UnexpectedArg { arg: token.clone() });
            }
            network = Some(token.clone());
            continue;
        }

        let (flag, inline_value) = match token.split_once('=') {
            Some((flag, value)) => (flag, Some(value.to_string())),
            None => (token.as_str(), None),
        };

        match flag {
            "--json" => output = OutputFormat::Json,
            "--dry-run" => dry_run = true,
            _ => {
                let value = match inline_value {
                    Some(value) => value,
                    None => flag_value(&mut tokens, flag)?,
                };
                apply_flag(&mut overrides, flag, value)?;
            }
        }
    }

    let network = network.ok_or_else(|| CliError::MissingRequiredArg {
        arg: "network".to_string(),
    })?;

    Ok(CliAction::Deploy(DeployArgs {
        network,
        overrides,
        output,
        dry_run,
    }))
}

fn flag_value<'a, I>(tokens: &mut I, flag: &str) -> Result<String, CliError>
where
    I: Iterator<Item = &'a String>,
{
    let name = flag.trim_start_matches('-').replace('-', "_");
    if !is_value_flag(flag) {
        return Err(CliError::UnknownFlag {
            flag: flag.to_string(),
        });
    }
    match tokens.next() {
        Some(value) if !value.starts_with("--") => Ok(value.clone()),
        _ => Err(CliError::MissingRequiredArg { arg: name }),
    }
}

fn is_value_flag(flag: &str) -> bool {
    matches!(
        flag,
        "--config"
            | "--artifact"
            | "--rpc-url"
            | "--confirmations"
            | "--admin"
            | "--bidding-start"
            | "--bidding-end"
            | "--min-bid-price"
            | "--nft-contract"
            | "--total-supply"
            | "--client-bin"
            | "--base-dir"
            | "--burn-cap"
    )
}

fn apply_flag(overrides: &mut ConfigOverrides, flag: &str, value: String) -> Result<(), CliError> {
    match flag {
        "--config" => overrides.config_path = Some(PathBuf::from(value)),
        "--artifact" => overrides.artifact_path = Some(PathBuf::from(value)),
        "--rpc-url" => overrides.rpc_url = Some(value),
        "--confirmations" => {
            let confirmations = value
                .parse::<u32>()
                .map_err(|e| CliError::InvalidArgValue {
                    arg: "confirmations".to_string(),
                    error: format!("{e}"),
                })?;
            if confirmations == 0 {
                return Err(CliError::InvalidArgValue {
                    arg: "confirmations".to_string(),
                    error: "must be at least 1".to_string(),
                });
            }
            overrides.confirmations = Some(confirmations);
        }
        "--admin" => overrides.admin = Some(value),
        "--bidding-start" => overrides.bidding_start = Some(value),
        "--bidding-end" => overrides.bidding_end = Some(value),
        "--min-bid-price" => overrides.min_bid_price = Some(value),
        "--nft-contract" => overrides.nft_contract_address = Some(value),
        "--total-supply" => overrides.total_supply = Some(value),
        "--client-bin" => overrides.client_bin = Some(value),
        "--base-dir" => overrides.base_dir = Some(PathBuf::from(value)),
        "--burn-cap" => overrides.burn_cap = Some(value),
        other => {
            return Err(CliError::UnknownFlag {
                flag: other.to_string(),
            })
        }
    }
    Ok(())
}

impl From<CliError> for crate::DeployError {
    fn from(err: CliError) -> Self {
        Self::Cli(err.to_string())
    }
}
