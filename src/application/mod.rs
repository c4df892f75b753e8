//! Application layer: commands, the command index and dispatch
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod builtins;
pub mod command;
pub mod dispatcher;
pub mod error;
pub mod index;
pub mod tool;

pub use builtins::Core;
pub use command::{describe_or_dispatch, Command};
pub use dispatcher::ToolCli;
pub use error::{ApplicationError, ApplicationResult};
pub use index::{Index, Node};
pub use tool::Tool;
