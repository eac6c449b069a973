//! Originates the BatchAuction contract on a Tezos network.
//!
//! The crate renders the contract's initial storage, reads the compiled
//! Michelson from disk and hands both to a [`chain::ChainClient`]. Every
//! successful deployment creates a new contract instance; running it twice
//! with the same parameters is not idempotent.

pub mod artifact;
pub mod chain;
pub mod cli;
pub mod config;
pub mod deployer;
pub mod error;
pub mod output;
pub mod storage;
pub mod types;

pub use artifact::ArtifactLoader;
pub use chain::{ChainClient, OctezClient, Operation, PortFuture};
pub use deployer::Deployer;
pub use error::{DeployError, Result};
pub use storage::render_storage;
pub use types::*;
