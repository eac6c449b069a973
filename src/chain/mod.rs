#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Narrow interface to whatever submits operations to the chain.
//!
//! The deployer only needs to originate a contract and wait for it to be
//! confirmed, so that is all these traits expose. Signing, fee estimation and
//! RPC plumbing belong to the implementation.

mod command;
mod octez;

pub use command::{run_external_command, CommandOutput};
pub use octez::{OctezClient, OctezSettings};

use crate::types::{ContractAddress, ContractArtifact, OperationHash, StorageExpression};
use crate::Result;
use std::future::Future;
use std::pin::Pin;

pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// A submitted origination.
pub trait Operation: Send + Sync {
    fn hash(&self) -> &OperationHash;

    fn contract_address(&self) -> &ContractAddress;

    /// Resolves once the operation has `confirmations` blocks on top of it.
    fn confirmation(&self, confirmations: u32) -> PortFuture<'_, ()>;
}

pub trait ChainClient: Send + Sync {
    /// Submits an origination of `artifact` with `storage` as initial storage.
    ///
    /// Once this resolves the operation has been injected and cannot be undone.
    fn originate<'a>(
        &'a self,
        artifact: &'a ContractArtifact,
        storage: &'a StorageExpression,
    ) -> PortFuture<'a, Box<dyn Operation + 'a>>;
}
