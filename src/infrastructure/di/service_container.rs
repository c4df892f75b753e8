//! Service container for dependency injection
//!
//! Wires up the I/O boundaries a tool session depends on.

use std::sync::Arc;

use crate::cli::output::ColorOutput;
use crate::infrastructure::traits::{InputReader, Output, Shell, StdinReader, SystemShell};

/// Container holding the I/O services of one session.
#[derive(Clone)]
pub struct ServiceContainer {
    /// Terminal output
    pub output: Arc<dyn Output>,

    /// Interactive answers (disambiguation prompt)
    pub input: Arc<dyn InputReader>,

    /// Shell used by built-in commands
    pub shell: Arc<dyn Shell>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new() -> Self {
        Self::with_deps(
            Arc::new(ColorOutput::new()),
            Arc::new(StdinReader),
            Arc::new(SystemShell),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        output: Arc<dyn Output>,
        input: Arc<dyn InputReader>,
        shell: Arc<dyn Shell>,
    ) -> Self {
        Self {
            output,
            input,
            shell,
        }
    }
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new()
    }
}
