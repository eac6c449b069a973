#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! `ChainClient` backed by the `octez-client` binary.
//!
//! Signing, fee estimation and injection all happen inside `octez-client`;
//! this adapter only builds its command lines and reads back the operation
//! hash and the originated contract address.

use super::command::{run_external_command, CommandOutput};
use super::{ChainClient, Operation, PortFuture};
use crate::types::{
    ContractAddress, ContractArtifact, OperationHash, PrivateKey, StorageExpression,
};
use crate::{DeployError, Result};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::OnceCell;
use url::Url;

#[derive(Debug, Clone)]
pub struct OctezSettings {
    pub binary: String,
    pub endpoint: Url,
    pub base_dir: Option<PathBuf>,
    pub signer_alias: String,
    pub contract_alias: String,
    pub burn_cap: String,
    pub command_timeout: Duration,
    pub private_key: PrivateKey,
}

#[derive(Debug)]
pub struct OctezClient {
    settings: OctezSettings,
    key_imported: OnceCell<()>,
}

impl OctezClient {
    #[must_use]
    pub fn new(settings: OctezSettings) -> Self {
        Self {
            settings,
            key_imported: OnceCell::new(),
        }
    }

    fn command_args<I, S>(&self, tail: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = vec!["--endpoint".to_string(), self.settings.endpoint.to_string()];
        if let Some(base_dir) = &self.settings.base_dir {
            args.push("--base-dir".to_string());
            args.push(base_dir.to_string_lossy().into_owned());
        }
        args.extend(tail.into_iter().map(Into::into));
        args
    }

    async fn run(&self, args: &[String]) -> Result<CommandOutput> {
        run_external_command(&self.settings.binary, args, self.settings.command_timeout).await
    }

    async fn ensure_key_imported(&self) -> Result<()> {
        self.key_imported
            .get_or_try_init(|| async {
                if self.settings.base_dir.is_none() {
                    tracing::warn!(
                        "no base directory set; the signing key is stored in octez-client's default one"
                    );
                }
                let args = self.command_args([
                    "import".to_string(),
                    "secret".to_string(),
                    "key".to_string(),
                    self.settings.signer_alias.clone(),
                    secret_key_uri(&self.settings.private_key),
                    "--force".to_string(),
                ]);
                let output = self.run(&args).await?;
                if output.success() {
                    tracing::info!(alias = %self.settings.signer_alias, "signing key imported");
                    Ok(())
                } else {
                    // stderr is not echoed here since it may quote the key
                    Err(DeployError::Origination(format!(
                        "{} could not import the signing key (exit {})",
                        self.settings.binary, output.exit_code
                    )))
                }
            })
            .await
            .map(|_| ())
    }
}

fn secret_key_uri(key: &PrivateKey) -> String {
    let raw = key.expose().trim();
    if raw.starts_with("unencrypted:") || raw.starts_with("encrypted:") {
        raw.to_string()
    } else {
        format!("unencrypted:{raw}")
    }
}

impl ChainClient for OctezClient {
    fn originate<'a>(
        &'a self,
        artifact: &'a ContractArtifact,
        storage: &'a StorageExpression,
    ) -> PortFuture<'a, Box<dyn Operation + 'a>> {
        Box::pin(async move {
            self.ensure_key_imported().await?;

            let args = self.command_args([
                "originate",
                "contract",
                self.settings.contract_alias.as_str(),
                "transferring",
                "0",
                "from",
                self.settings.signer_alias.as_str(),
                "running",
                artifact.code(),
                "--init",
                storage.as_str(),
                "--burn-cap",
                self.settings.burn_cap.as_str(),
                "--force",
                "--wait",
                "none",
            ]);
            let output = self.run(&args).await?;
            if !output.success() {
                return Err(DeployError::Origination(format!(
                    "{} originate exited with {}: {}",
                    self.settings.binary,
                    output.exit_code,
                    output.failure_detail()
                )));
            }

            let combined = format!("{}\n{}", output.stdout, output.stderr);
            let hash = parse_operation_hash(&combined).ok_or_else(|| {
                DeployError::Origination(format!(
                    "no operation hash in client output{}",
                    output.truncation_note()
                ))
            })?;
            let address = parse_contract_address(&combined).ok_or_else(|| {
                DeployError::Origination(format!(
                    "no contract address in client output for operation {hash}{}",
                    output.truncation_note()
                ))
            })?;
            tracing::info!(%hash, %address, "origination injected");

            let operation: Box<dyn Operation + 'a> = Box::new(OctezOperation {
                client: self,
                hash,
                address,
            });
            Ok(operation)
        })
    }
}

struct OctezOperation<'a> {
    client: &'a OctezClient,
    hash: OperationHash,
    address: ContractAddress,
}

impl Operation for OctezOperation<'_> {
    fn hash(&self) -> &OperationHash {
        &self.hash
    }

    fn contract_address(&self) -> &ContractAddress {
        &self.address
    }

    fn confirmation(&self, confirmations: u32) -> PortFuture<'_, ()> {
        Box::pin(async move {
            let args = self.client.command_args([
                "wait".to_string(),
                "for".to_string(),
                self.hash.value().to_string(),
                "to".to_string(),
                "be".to_string(),
                "included".to_string(),
                "--confirmations".to_string(),
                confirmations.to_string(),
            ]);
            let output = self.client.run(&args).await?;
            if output.success() {
                Ok(())
            } else {
                Err(DeployError::Origination(format!(
                    "operation {} was not confirmed: {}",
                    self.hash,
                    output.failure_detail()
                )))
            }
        })
    }
}

/// Extracts `<hash>` from `Operation hash is '<hash>'`.
#[must_use]
pub fn parse_operation_hash(output: &str) -> Option<OperationHash> {
    const MARKER: &str = "Operation hash is '";
    let start = output.find(MARKER)? + MARKER.len();
    let rest = &output[start..];
    let end = rest.find('\'')?;
    let hash = rest[..end].trim();
    (!hash.is_empty()).then(|| OperationHash::new(hash))
}

/// Extracts the `KT1` address from `New contract <address> originated.`
#[must_use]
pub fn parse_contract_address(output: &str) -> Option<ContractAddress> {
    const MARKER: &str = "New contract ";
    let start = output.find(MARKER)? + MARKER.len();
    output[start..]
        .split_whitespace()
        .next()
        .map(|token| token.trim_end_matches('.'))
        .filter(|token| token.starts_with("KT1"))
        .map(ContractAddress::new)
}
