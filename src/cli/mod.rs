//! CLI layer: argument parsing, terminal output and the binary's entry

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::Cli;
pub use error::{CliError, CliResult};
pub use output::ColorOutput;
