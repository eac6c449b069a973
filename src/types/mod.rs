mod contract;
mod identifiers;
mod parameters;
mod result;
mod secret;

pub use contract::{ContractArtifact, StorageExpression};
pub use identifiers::{ContractAddress, OperationHash};
pub use parameters::DeploymentParameters;
pub use result::{DeploymentResult, FailureKind};
pub use secret::PrivateKey;
