//! Tool session: the context every command runs against
//!
//! One `Tool` is constructed by the entry point and lives for the whole process.
//! Commands receive it by shared reference instead of reaching for a global.

use tracing::{error, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, ToolCli};
use crate::config::Settings;
use crate::domain::{AliasTable, FileConfig, Memory};
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{InputReader, Output, Shell};

pub struct Tool {
    settings: Settings,
    aliases: AliasTable,
    cli: ToolCli,
    services: ServiceContainer,
    memory: Memory,
}

impl Tool {
    /// Create a session with real terminal, stdin and shell.
    pub fn new(settings: Settings, cli: ToolCli) -> Self {
        Self::with_services(settings, cli, ServiceContainer::new())
    }

    /// Create a session with custom services (for testing).
    pub fn with_services(settings: Settings, cli: ToolCli, services: ServiceContainer) -> Self {
        let aliases = AliasTable::new(settings.aliases.clone());
        Self {
            settings,
            aliases,
            cli,
            services,
            memory: Memory::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn cli(&self) -> &ToolCli {
        &self.cli
    }

    pub fn output(&self) -> &dyn Output {
        self.services.output.as_ref()
    }

    pub fn input(&self) -> &dyn InputReader {
        self.services.input.as_ref()
    }

    pub fn shell(&self) -> &dyn Shell {
        self.services.shell.as_ref()
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// `<cli name>.json` from the current working directory, read on each call.
    pub fn local(&self) -> FileConfig {
        FileConfig::local(self.cli.name())
    }

    /// Dispatch without reporting.
    pub fn run(&self, arguments: &[String]) -> ApplicationResult<()> {
        self.cli.run(arguments, self)
    }

    /// Dispatch, report a failure through the output's error channel and return
    /// the process exit code.
    #[instrument(level = "debug", skip(self))]
    pub fn launch(&self, arguments: &[String]) -> i32 {
        match self.run(arguments) {
            Ok(()) => exitcode::OK,
            Err(ApplicationError::Cancelled) => {
                info!("cancelled by user");
                exitcode::OK
            }
            Err(e) => {
                if e.is_fatal() {
                    error!("misconfigured tool {}: {}", self.cli.name(), e);
                }
                self.output().error(&e);
                e.exit_code()
            }
        }
    }
}
