//! Build personal command-line tools from a tree of commands.
//!
//! A tool is a [`ToolCli`] (a `core` command plus your own commands) running
//! inside a [`Tool`] session. Dispatch resolves the first argument through the
//! alias table, then by name anywhere in the command tree, asking the user when
//! a name is ambiguous. `core help` renders the indented tree.
//!
//! ```ignore
//! let settings = Settings::load("my")?;
//! let cli = ToolCli::new("my", "my tool", Core::new(&settings).into_arc(), commands);
//! let tool = Tool::new(settings, cli);
//! std::process::exit(tool.launch(&std::env::args().skip(1).collect::<Vec<_>>()));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{Command, Core, Tool, ToolCli};
pub use config::Settings;
