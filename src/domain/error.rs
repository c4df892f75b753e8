//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent lookup and configuration violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// `scope` is the command whose subtree was searched.
    #[error("{scope}: command not found: {name}")]
    NotFound { scope: String, name: String },

    #[error("found multiple aliases named: {0}")]
    AmbiguousAlias(String),

    /// The alias came back as the first token of its own expansion.
    #[error("alias expands into itself: {0}")]
    AliasCycle(String),
}

impl DomainError {
    pub fn not_found(scope: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            scope: scope.into(),
            name: name.into(),
        }
    }
}
