use super::ContractAddress;
use crate::error::{code, DeployError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The contract artifact could not be read
    Load,
    /// Submission or confirmation was rejected by the client or the chain
    Origination,
}

impl FailureKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Load => code::LOAD,
            Self::Origination => code::ORIGINATION,
        }
    }

    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Load => 3,
            Self::Origination => 4,
        }
    }
}

/// Outcome of a single deployment attempt.
///
/// Each `Deployed` result refers to a distinct contract instance: deploying the
/// same parameters twice originates two contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeploymentResult {
    Deployed { address: ContractAddress },
    Failed { kind: FailureKind, message: String },
}

impl DeploymentResult {
    #[must_use]
    pub fn failed(kind: FailureKind, error: &DeployError) -> Self {
        Self::Failed {
            kind,
            message: error.to_string(),
        }
    }

    #[must_use]
    pub const fn is_deployed(&self) -> bool {
        matches!(self, Self::Deployed { .. })
    }

    #[must_use]
    pub const fn address(&self) -> Option<&ContractAddress> {
        match self {
            Self::Deployed { address } => Some(address),
            Self::Failed { .. } => None,
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Deployed { .. } => 0,
            Self::Failed { kind, .. } => kind.exit_code(),
        }
    }
}
