//! Built-in `core` command and its subcommands

use std::sync::Arc;

use tracing::instrument;

use crate::application::{ApplicationResult, Command, Tool};
use crate::config::Settings;

/// Drives the tool itself: configuration, help, rebuild and self-update.
pub struct Core {
    commands: Vec<Arc<dyn Command>>,
}

impl Core {
    pub const NAME: &'static str = "core";

    pub fn new(settings: &Settings) -> Self {
        Self {
            commands: vec![
                Arc::new(ConfigCommand),
                Arc::new(Edit),
                Arc::new(Help),
                Arc::new(Reload {
                    bin_dir: settings.bin_dir.display().to_string(),
                }),
                Arc::new(Update {
                    source_url: settings.source_url.clone(),
                }),
                Arc::new(Version),
            ],
        }
    }

    pub fn into_arc(self) -> Arc<dyn Command> {
        Arc::new(self)
    }
}

impl Command for Core {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn overview(&self) -> String {
        "command which drives this thing".to_string()
    }

    fn commands(&self) -> Vec<Arc<dyn Command>> {
        self.commands.clone()
    }
}

struct ConfigCommand;

impl Command for ConfigCommand {
    fn name(&self) -> &str {
        "config"
    }

    fn overview(&self) -> String {
        "output current config".to_string()
    }

    fn run(&self, _arguments: &[String], tool: &Tool) -> ApplicationResult<()> {
        tool.output().text(&tool.settings().describe(&tool.local()));
        Ok(())
    }
}

struct Edit;

impl Command for Edit {
    fn name(&self) -> &str {
        "edit"
    }

    fn overview(&self) -> String {
        "open this project in the editor".to_string()
    }

    #[instrument(level = "debug", skip_all)]
    fn run(&self, _arguments: &[String], tool: &Tool) -> ApplicationResult<()> {
        tool.shell().run("make edit", &tool.settings().source_dir)?;
        Ok(())
    }
}

struct Help;

impl Command for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn overview(&self) -> String {
        "output description for given command".to_string()
    }

    fn run(&self, arguments: &[String], tool: &Tool) -> ApplicationResult<()> {
        let text = tool.cli().help_text(arguments, tool)?;
        tool.output().text(&text);
        Ok(())
    }
}

struct Reload {
    bin_dir: String,
}

impl Command for Reload {
    fn name(&self) -> &str {
        "reload"
    }

    fn overview(&self) -> String {
        format!("build & deploy tool to {}", self.bin_dir)
    }

    #[instrument(level = "debug", skip_all)]
    fn run(&self, _arguments: &[String], tool: &Tool) -> ApplicationResult<()> {
        let out = tool.shell().run("make reload", &tool.settings().source_dir)?;
        tool.output().text(&out);
        Ok(())
    }
}

struct Update {
    source_url: String,
}

impl Command for Update {
    fn name(&self) -> &str {
        "update"
    }

    fn overview(&self) -> String {
        format!("merge changes from {}", self.source_url)
    }

    #[instrument(level = "debug", skip_all)]
    fn run(&self, _arguments: &[String], tool: &Tool) -> ApplicationResult<()> {
        let out = tool.shell().run("make update", &tool.settings().source_dir)?;
        tool.output().text(&out);
        Ok(())
    }
}

struct Version;

impl Command for Version {
    fn name(&self) -> &str {
        "version"
    }

    fn overview(&self) -> String {
        "output current version".to_string()
    }

    fn run(&self, _arguments: &[String], tool: &Tool) -> ApplicationResult<()> {
        tool.output().text(&tool.settings().version);
        Ok(())
    }
}
