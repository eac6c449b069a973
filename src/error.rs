#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Error code constants for type-safe error handling
pub mod code {
    pub const CLI_ERROR: &str = "CLI_ERROR";
    pub const CONFIG: &str = "CONFIG";
    pub const LOAD: &str = "LOAD";
    pub const ORIGINATION: &str = "ORIGINATION";
    pub const DEPENDENCY: &str = "DEPENDENCY";
    pub const INTERNAL: &str = "INTERNAL";
}

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Cli(String),

    #[error("Failed to load contract artifact {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Origination failed: {0}")]
    Origination(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DeployError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => code::CONFIG,
            Self::Cli(_) => code::CLI_ERROR,
            Self::Load { .. } => code::LOAD,
            Self::Origination(_) => code::ORIGINATION,
            Self::Io(_) => code::DEPENDENCY,
            Self::Internal(_) => code::INTERNAL,
        }
    }

    /// Returns the process exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Cli(_) => 2,
            Self::Load { .. } => 3,
            Self::Origination(_) => 4,
            Self::Io(_) => 7,
            Self::Internal(_) => 9,
        }
    }
}

/// Error codes with a description and a suggested fix
pub const ERROR_CODES: &[(&str, &str, &str)] = &[
    (
        code::CLI_ERROR,
        "Invalid CLI usage",
        "Run 'batch-auction-deploy --help' for valid options",
    ),
    (
        code::CONFIG,
        "Invalid or incomplete configuration",
        "Check the config file and export PRIVATE_KEY",
    ),
    (
        code::LOAD,
        "Contract artifact could not be read",
        "Compile the contract and pass its path with --artifact",
    ),
    (
        code::ORIGINATION,
        "Origination was rejected or not confirmed",
        "Inspect the client output; a storage shape mismatch is reported here",
    ),
    (
        code::DEPENDENCY,
        "Missing system dependency",
        "Install octez-client or pass --client-bin",
    ),
    (
        code::INTERNAL,
        "Unexpected internal failure",
        "Inspect logs with RUST_LOG=debug and retry",
    ),
];

/// Get error code details (description and fix) for a given error code
#[must_use]
pub fn get_error_info(error_code: &str) -> Option<(&'static str, &'static str)> {
    ERROR_CODES
        .iter()
        .find(|(code, _, _)| *code == error_code)
        .map(|(_, desc, fix)| (*desc, *fix))
}

pub type Result<T> = std::result::Result<T, DeployError>;
