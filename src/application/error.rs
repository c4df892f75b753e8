//! Application-level errors (wraps domain and infrastructure errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// Application errors wrap lower layers and add dispatch-level conditions.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid choice")]
    InvalidChoice,

    /// The user answered `0` at the disambiguation prompt.
    #[error("cancelled")]
    Cancelled,

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    /// Author errors that abort the process instead of being reported as bad input.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Domain(DomainError::AmbiguousAlias(_) | DomainError::AliasCycle(_))
        )
    }

    /// Exit code for an error that ends a dispatch.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Cancelled => exitcode::OK,
            Self::Domain(DomainError::AmbiguousAlias(_) | DomainError::AliasCycle(_))
            | Self::Config { .. } => exitcode::CONFIG,
            Self::Domain(DomainError::NotFound { .. }) | Self::InvalidChoice => exitcode::USAGE,
            Self::Infra(InfraError::Io { .. }) => exitcode::IOERR,
            Self::Infra(InfraError::Shell { .. }) => exitcode::SOFTWARE,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
