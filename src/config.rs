#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::chain::OctezSettings;
use crate::deployer::DEFAULT_CONFIRMATIONS;
use crate::types::{DeploymentParameters, PrivateKey};
use crate::{DeployError, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = ".deploy/config.toml";
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

pub const DEFAULT_PROVIDER_DOMAIN: &str = "smartpy.io";
pub const DEFAULT_ARTIFACT_PATH: &str = "smart_contracts/michelson/batch_auction.tz";
pub const DEFAULT_CLIENT_BIN: &str = "octez-client";
pub const DEFAULT_SIGNER_ALIAS: &str = "batch_auction_deployer";
pub const DEFAULT_CONTRACT_ALIAS: &str = "batch_auction";
pub const DEFAULT_BURN_CAP: &str = "5";
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 120_000;

/// Auction values used when neither the config file nor the command line set them
pub mod defaults {
    pub const ADMIN: &str = "tz1ZczbHu1iLWRa88n9CUiCKDGex5ticp19S";
    pub const BIDDING_START: &str = "2021-10-24T13:00:00+05:30";
    pub const BIDDING_END: &str = "2021-10-24T18:00:00+05:30";
    pub const MIN_BID_PRICE: &str = "1000000";
    pub const NFT_CONTRACT_ADDRESS: &str = "KT1VcBHBPDnzqYi51gdeNbq7pohKUToH4PN1";
    pub const TOTAL_SUPPLY: &str = "100";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub network: String,
    pub provider_domain: String,
    pub rpc_url: Option<String>,
    pub artifact_path: PathBuf,
    pub confirmations: u32,
    pub admin: String,
    pub bidding_start: String,
    pub bidding_end: String,
    pub min_bid_price: String,
    pub nft_contract_address: String,
    pub total_supply: String,
    pub client_bin: String,
    pub base_dir: Option<PathBuf>,
    pub signer_alias: String,
    pub contract_alias: String,
    pub burn_cap: String,
    pub command_timeout_ms: u64,
}

/// Values given on the command line; each one beats the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub rpc_url: Option<String>,
    pub artifact_path: Option<PathBuf>,
    pub confirmations: Option<u32>,
    pub admin: Option<String>,
    pub bidding_start: Option<String>,
    pub bidding_end: Option<String>,
    pub min_bid_price: Option<String>,
    pub nft_contract_address: Option<String>,
    pub total_supply: Option<String>,
    pub client_bin: Option<String>,
    pub base_dir: Option<PathBuf>,
    pub burn_cap: Option<String>,
}

impl DeployConfig {
    #[must_use]
    pub fn defaults(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            provider_domain: DEFAULT_PROVIDER_DOMAIN.to_string(),
            rpc_url: None,
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            confirmations: DEFAULT_CONFIRMATIONS,
            admin: defaults::ADMIN.to_string(),
            bidding_start: defaults::BIDDING_START.to_string(),
            bidding_end: defaults::BIDDING_END.to_string(),
            min_bid_price: defaults::MIN_BID_PRICE.to_string(),
            nft_contract_address: defaults::NFT_CONTRACT_ADDRESS.to_string(),
            total_supply: defaults::TOTAL_SUPPLY.to_string(),
            client_bin: DEFAULT_CLIENT_BIN.to_string(),
            base_dir: None,
            signer_alias: DEFAULT_SIGNER_ALIAS.to_string(),
            contract_alias: DEFAULT_CONTRACT_ALIAS.to_string(),
            burn_cap: DEFAULT_BURN_CAP.to_string(),
            command_timeout_ms: DEFAULT_COMMAND_TIMEOUT_MS,
        }
    }

    /// Applies `key = "value"` lines from a config file.
    ///
    /// # Errors
    /// Returns `DeployError::Config` when a numeric setting does not parse.
    pub fn apply_file_content(&mut self, content: &str) -> Result<()> {
        for line in content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('['))
        {
            let Some((key, value)) = split_key_value(line) else {
                tracing::warn!(line, "ignoring malformed config line");
                continue;
            };
            let value = expand_env_vars(value);
            match key {
                "provider_domain" => self.provider_domain = value,
                "rpc_url" => self.rpc_url = Some(value),
                "artifact" | "artifact_path" => self.artifact_path = PathBuf::from(value),
                "confirmations" => self.confirmations = parse_confirmations(&value)?,
                "admin" => self.admin = value,
                "bidding_start" => self.bidding_start = value,
                "bidding_end" => self.bidding_end = value,
                "min_bid_price" => self.min_bid_price = value,
                "nft_contract_address" => self.nft_contract_address = value,
                "total_supply" => self.total_supply = value,
                "client_bin" => self.client_bin = value,
                "base_dir" => self.base_dir = Some(PathBuf::from(value)),
                "signer_alias" => self.signer_alias = value,
                "contract_alias" => self.contract_alias = value,
                "burn_cap" => self.burn_cap = value,
                "command_timeout_ms" => self.command_timeout_ms = parse_number(key, &value)?,
                other => tracing::warn!(key = other, "ignoring unknown config key"),
            }
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            config_path: _,
            rpc_url,
            artifact_path,
            confirmations,
            admin,
            bidding_start,
            bidding_end,
            min_bid_price,
            nft_contract_address,
            total_supply,
            client_bin,
            base_dir,
            burn_cap,
        } = overrides;

        if rpc_url.is_some() {
            self.rpc_url = rpc_url;
        }
        if base_dir.is_some() {
            self.base_dir = base_dir;
        }
        override_with(&mut self.artifact_path, artifact_path);
        override_with(&mut self.confirmations, confirmations);
        override_with(&mut self.admin, admin);
        override_with(&mut self.bidding_start, bidding_start);
        override_with(&mut self.bidding_end, bidding_end);
        override_with(&mut self.min_bid_price, min_bid_price);
        override_with(&mut self.nft_contract_address, nft_contract_address);
        override_with(&mut self.total_supply, total_supply);
        override_with(&mut self.client_bin, client_bin);
        override_with(&mut self.burn_cap, burn_cap);
    }

    /// RPC endpoint: `--rpc-url` when given, else `https://<network>.<provider_domain>`.
    ///
    /// # Errors
    /// Returns `DeployError::Config` if the resulting URL is not a valid http(s) URL.
    pub fn endpoint(&self) -> Result<Url> {
        let raw = self.rpc_url.clone().unwrap_or_else(|| {
            format!("https://{}.{}", self.network.trim(), self.provider_domain.trim())
        });
        let url = Url::parse(&raw)
            .map_err(|err| DeployError::Config(format!("Invalid network endpoint {raw}: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(DeployError::Config(format!(
                "Network endpoint must be an http(s) URL with a host: {raw}"
            )));
        }
        Ok(url)
    }

    #[must_use]
    pub fn parameters(&self) -> DeploymentParameters {
        DeploymentParameters::new(
            self.admin.as_str(),
            self.bidding_start.as_str(),
            self.bidding_end.as_str(),
            self.min_bid_price.as_str(),
            self.nft_contract_address.as_str(),
            self.total_supply.as_str(),
        )
    }

    #[must_use]
    pub const fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    /// # Errors
    /// Returns `DeployError::Config` if the endpoint is invalid.
    pub fn octez_settings(&self, private_key: PrivateKey) -> Result<OctezSettings> {
        Ok(OctezSettings {
            binary: self.client_bin.clone(),
            endpoint: self.endpoint()?,
            base_dir: self.base_dir.clone(),
            signer_alias: self.signer_alias.clone(),
            contract_alias: self.contract_alias.clone(),
            burn_cap: self.burn_cap.clone(),
            command_timeout: self.command_timeout(),
            private_key,
        })
    }
}

fn override_with<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| DeployError::Config(format!("{key} must be a non-negative integer, got {value}")))
}

fn parse_confirmations(value: &str) -> Result<u32> {
    match parse_number("confirmations", value)? {
        0 => Err(DeployError::Config(
            "confirmations must be at least 1, got 0".to_string(),
        )),
        n => Ok(n),
    }
}

/// Builds the configuration for `network`: defaults, then the config file, then `overrides`.
///
/// A missing file at the default location is fine; a missing file that was
/// asked for explicitly is not.
///
/// # Errors
/// Returns `DeployError::Config` if the config file cannot be read or holds an
/// invalid number.
pub async fn load_config(network: &str, overrides: ConfigOverrides) -> Result<DeployConfig> {
    let mut config = DeployConfig::defaults(network);
    let explicit = overrides.config_path.is_some();
    let config_path = overrides
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    if config_path.exists() {
        let content = tokio::fs::read_to_string(&config_path)
            .await
            .map_err(|e| DeployError::Config(format!("Failed to read config: {e}")))?;
        config.apply_file_content(&content)?;
        tracing::debug!(path = %config_path.display(), "config file applied");
    } else if explicit {
        return Err(DeployError::Config(format!(
            "Config file not found: {}",
            config_path.display()
        )));
    }

    config.apply_overrides(overrides);
    Ok(config)
}

/// Reads the signing key from `PRIVATE_KEY`, loading `.env` first if present.
///
/// # Errors
/// Returns `DeployError::Config` if the variable is unset or empty.
pub fn private_key_from_env() -> Result<PrivateKey> {
    let _ = dotenv::dotenv();
    std::env::var(PRIVATE_KEY_ENV)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .map(PrivateKey::new)
        .ok_or_else(|| {
            DeployError::Config(format!(
                "{PRIVATE_KEY_ENV} is not set; export the deployer's secret key"
            ))
        })
}

/// Expands `${VAR}` and `${VAR:-default}` in one left-to-right pass;
/// substituted text is never rescanned.
fn expand_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_part = &rest[start + 2..start + end];
        let (var_name, default) = var_part.split_once(":-").unwrap_or((var_part, ""));
        result.push_str(&std::env::var(var_name).unwrap_or_else(|_| default.to_string()));
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    line.split_once('=')
        .map(|(lhs, rhs)| (lhs.trim(), rhs.trim().trim_matches('"')))
        .filter(|(lhs, _)| !lhs.is_empty())
}
