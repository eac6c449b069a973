use std::fmt;

/// Compiled contract code, passed through to the chain client untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractArtifact(String);

impl ContractArtifact {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }
}

/// Michelson literal used as the initial storage of an origination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageExpression(String);

impl StorageExpression {
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
