//! I/O boundary traits for testability
//!
//! These traits abstract the terminal, interactive input and the shell,
//! allowing the dispatcher and built-in commands to be tested with mock implementations.

use std::io::{self, BufRead};
use std::path::Path;

use tracing::debug;

use crate::infrastructure::{InfraError, InfraResult};

/// One row of a command listing: name and one-line overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSummary {
    pub name: String,
    pub overview: String,
}

/// Destination for everything a tool prints.
pub trait Output: Send + Sync {
    /// Regular output of a command.
    fn text(&self, text: &str);

    /// Report an error.
    fn error(&self, error: &dyn std::error::Error);

    /// Trace lines wrapped around each dispatched command.
    fn system(&self, text: &str);

    /// Generic description of a command: overview, listing of its subcommands, help.
    fn describe(&self, overview: &str, commands: &[CommandSummary], help: Option<&str>) -> String;

    /// Aligned `name  >  overview` listing.
    fn describe_list(&self, commands: &[CommandSummary]) -> String;
}

/// Source of interactive answers.
pub trait InputReader: Send + Sync {
    /// Read one line without its terminator. `None` on end of input.
    fn read_line(&self) -> io::Result<Option<String>>;
}

/// Shell execution abstraction.
pub trait Shell: Send + Sync {
    /// Run `command_line` in `dir`, returning captured stdout.
    ///
    /// A non-zero exit fails with [`InfraError::Shell`].
    fn run(&self, command_line: &str, dir: &Path) -> InfraResult<String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Reads answers from standard input.
#[derive(Debug, Default)]
pub struct StdinReader;

impl InputReader for StdinReader {
    fn read_line(&self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Runs command lines through `$SHELL -c`, falling back to `sh`.
#[derive(Debug, Default)]
pub struct SystemShell;

impl Shell for SystemShell {
    fn run(&self, command_line: &str, dir: &Path) -> InfraResult<String> {
        let shell = std::env::var("SHELL").unwrap_or_else(|_| "sh".to_string());
        debug!("shell: {} -c {:?} in {}", shell, command_line, dir.display());

        let output = std::process::Command::new(&shell)
            .arg("-c")
            .arg(command_line)
            .current_dir(dir)
            .output()
            .map_err(|e| InfraError::io(format!("spawn {shell} in {}", dir.display()), e))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
        } else {
            Err(InfraError::Shell {
                status: output.status.code().unwrap_or(-1),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
