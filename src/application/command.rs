//! The command abstraction every tool is built from

use std::sync::Arc;

use crate::application::{ApplicationResult, Tool};
use crate::domain::DomainError;
use crate::infrastructure::traits::CommandSummary;

/// A named, invocable unit with an overview, optional help and ordered subcommands.
pub trait Command: Send + Sync {
    /// Unique among its siblings.
    fn name(&self) -> &str;

    /// One-line description shown in listings.
    fn overview(&self) -> String;

    fn help(&self) -> Option<String> {
        None
    }

    fn commands(&self) -> Vec<Arc<dyn Command>> {
        Vec::new()
    }

    /// Without arguments a command describes itself; otherwise the first argument
    /// selects a direct subcommand which runs with the rest.
    fn run(&self, arguments: &[String], tool: &Tool) -> ApplicationResult<()> {
        describe_or_dispatch(
            self.name(),
            &self.overview(),
            self.help().as_deref(),
            &self.commands(),
            arguments,
            tool,
        )
    }
}

/// Generic command behavior, usable by implementations that override `run`
/// for some arguments only.
pub fn describe_or_dispatch(
    name: &str,
    overview: &str,
    help: Option<&str>,
    commands: &[Arc<dyn Command>],
    arguments: &[String],
    tool: &Tool,
) -> ApplicationResult<()> {
    let Some((first, rest)) = arguments.split_first() else {
        let output = tool.output();
        output.text(&output.describe(overview, &summaries(commands), help));
        return Ok(());
    };
    let subcommand = commands
        .iter()
        .find(|c| c.name() == first.as_str())
        .ok_or_else(|| DomainError::not_found(name, first.as_str()))?;
    subcommand.run(rest, tool)
}

pub fn summaries(commands: &[Arc<dyn Command>]) -> Vec<CommandSummary> {
    commands
        .iter()
        .map(|c| CommandSummary {
            name: c.name().to_string(),
            overview: c.overview(),
        })
        .collect()
}
