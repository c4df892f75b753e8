//! Wires parsed flags, settings and the command tree into one session

use tracing::{debug, instrument};

use crate::application::{Core, Tool, ToolCli};
use crate::cli::args::Cli;
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::exitcode;

pub const APP: &str = "toolbelt";

/// Run the binary: returns the exit code of the dispatched command.
#[instrument(level = "debug", skip_all)]
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    if cli.template {
        output::info(&Settings::template(APP));
        return Ok(exitcode::OK);
    }

    let settings = match &cli.config {
        Some(path) => Settings::load_from(APP, path)?,
        None => Settings::load(APP)?,
    };
    debug!("settings: {:?}", settings);

    let tool = Tool::new(settings.clone(), build_cli(&settings));
    Ok(tool.launch(&cli.arguments))
}

/// The binary's own tree: just `core`.
pub fn build_cli(settings: &Settings) -> ToolCli {
    ToolCli::new(
        APP,
        "personal command tree",
        Core::new(settings).into_arc(),
        Vec::new(),
    )
    .with_help(format!("USAGE: {APP} [command path] [arguments]"))
}
