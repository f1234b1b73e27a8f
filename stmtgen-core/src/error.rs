//! Error taxonomy for statement generation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    /// Caller input (or catalog data) that can never produce a statement.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A transaction sequence that violates the ledger's ordering precondition.
    #[error("data integrity: {0}")]
    DataIntegrity(String),
}

impl StatementError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        StatementError::InvalidArgument(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, StatementError::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, StatementError>;
