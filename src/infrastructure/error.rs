//! Infrastructure-level errors (process spawning and I/O)

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Non-zero exit of a shell command, with its captured stderr.
    #[error("Status: {status}\nMessage: {message}")]
    Shell { status: i32, message: String },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
