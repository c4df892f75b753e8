//! CLI argument definitions using clap
//!
//! clap only handles the flags of the binary itself; everything after them is
//! the argument vector for the command tree.

use std::path::PathBuf;

use clap::{Parser, ValueHint};

/// Personal command tree: name lookup, aliases, help and traced execution
#[derive(Parser, Debug)]
#[command(name = "toolbelt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    /// Print a commented config file template
    #[arg(long)]
    pub template: bool,

    /// Config file to use instead of the global one
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<clap_complete::Shell>,

    /// Command path followed by its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub arguments: Vec<String>,
}
