#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::artifact::ArtifactLoader;
use crate::chain::ChainClient;
use crate::storage::render_storage;
use crate::types::{
    ContractAddress, ContractArtifact, DeploymentParameters, DeploymentResult, FailureKind,
    StorageExpression,
};
use crate::Result;
use std::path::PathBuf;
use tracing::{error, info};

pub const DEFAULT_CONFIRMATIONS: u32 = 1;

/// Originates the BatchAuction contract.
///
/// A single attempt is made per call and nothing is retried. Every successful
/// call creates a new contract on-chain, so calling `deploy` twice with the
/// same parameters yields two distinct addresses.
#[derive(Debug, Clone)]
pub struct Deployer {
    artifact_path: PathBuf,
    confirmations: u32,
    progress: bool,
}

impl Deployer {
    #[must_use]
    pub fn new(artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            artifact_path: artifact_path.into(),
            confirmations: DEFAULT_CONFIRMATIONS,
            progress: true,
        }
    }

    /// At least one confirmation is always awaited; `0` is treated as `1`.
    #[must_use]
    pub fn with_confirmations(mut self, confirmations: u32) -> Self {
        self.confirmations = confirmations.max(1);
        self
    }

    /// Suppresses the progress lines on stdout; tracing events are unaffected.
    #[must_use]
    pub const fn quiet(mut self) -> Self {
        self.progress = false;
        self
    }

    /// Renders storage, loads the artifact and originates it through `client`.
    ///
    /// Never fails: load and origination errors are logged and returned as
    /// `DeploymentResult::Failed`.
    pub async fn deploy(
        &self,
        params: &DeploymentParameters,
        client: &dyn ChainClient,
    ) -> DeploymentResult {
        let storage = render_storage(params);

        let artifact = match ArtifactLoader::load(&self.artifact_path) {
            Ok(artifact) => artifact,
            Err(err) => {
                error!(path = %self.artifact_path.display(), "{err}");
                return DeploymentResult::failed(FailureKind::Load, &err);
            }
        };

        self.report(">> Deploying BatchAuction Contract\n");
        info!(
            path = %self.artifact_path.display(),
            confirmations = self.confirmations,
            "originating BatchAuction"
        );

        match self.originate(client, &artifact, &storage).await {
            Ok(address) => {
                info!(%address, "BatchAuction deployed");
                self.report(&format!("BatchAuction deployed at: {address}\n"));
                DeploymentResult::Deployed { address }
            }
            Err(err) => {
                error!("{err}");
                DeploymentResult::failed(FailureKind::Origination, &err)
            }
        }
    }

    fn report(&self, line: &str) {
        if self.progress {
            println!("{line}");
        }
    }

    async fn originate(
        &self,
        client: &dyn ChainClient,
        artifact: &ContractArtifact,
        storage: &StorageExpression,
    ) -> Result<ContractAddress> {
        let operation = client.originate(artifact, storage).await?;
        info!(hash = %operation.hash(), "waiting for confirmation");
        operation.confirmation(self.confirmations).await?;
        Ok(operation.contract_address().clone())
    }
}
