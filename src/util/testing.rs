//! Test support: logging setup and doubles for the I/O boundaries

use std::collections::{HashMap, VecDeque};
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{describe_or_dispatch, ApplicationResult, Command, Tool, ToolCli};
use crate::cli::output::ColorOutput;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{CommandSummary, InputReader, Output, Shell};
use crate::infrastructure::{InfraError, InfraResult};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Arguments of every run of a [`StubCommand`].
pub type CallLog = Arc<Mutex<Vec<Vec<String>>>>;

/// Configurable command: prints a message, fails like a shell, or behaves generically.
pub struct StubCommand {
    name: String,
    overview: String,
    help: Option<String>,
    children: Vec<Arc<dyn Command>>,
    message: Option<String>,
    failure: Option<(i32, String)>,
    calls: CallLog,
}

impl StubCommand {
    pub fn new(name: &str, overview: &str) -> Self {
        Self {
            name: name.to_string(),
            overview: overview.to_string(),
            help: None,
            children: Vec::new(),
            message: None,
            failure: None,
            calls: CallLog::default(),
        }
    }

    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn with_children(mut self, children: Vec<Arc<dyn Command>>) -> Self {
        self.children = children;
        self
    }

    /// Print `message` when run.
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// Fail like a shell command exiting with `status`.
    pub fn with_failure(mut self, status: i32, message: &str) -> Self {
        self.failure = Some((status, message.to_string()));
        self
    }

    pub fn calls(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    pub fn into_arc(self) -> Arc<dyn Command> {
        Arc::new(self)
    }
}

impl Command for StubCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn overview(&self) -> String {
        self.overview.clone()
    }

    fn help(&self) -> Option<String> {
        self.help.clone()
    }

    fn commands(&self) -> Vec<Arc<dyn Command>> {
        self.children.clone()
    }

    fn run(&self, arguments: &[String], tool: &Tool) -> ApplicationResult<()> {
        lock(&*self.calls).push(arguments.to_vec());
        if let Some((status, message)) = &self.failure {
            return Err(InfraError::Shell {
                status: *status,
                message: message.clone(),
            }
            .into());
        }
        if let Some(message) = &self.message {
            tool.output().text(message);
            return Ok(());
        }
        describe_or_dispatch(
            &self.name,
            &self.overview,
            self.help.as_deref(),
            &self.children,
            arguments,
            tool,
        )
    }
}

/// Output that keeps everything in memory, rendering descriptions without color.
#[derive(Debug, Default)]
pub struct RecordingOutput {
    lines: Mutex<Vec<String>>,
    system: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingOutput {
    /// Regular text, one entry per call, joined by newlines.
    pub fn printed(&self) -> String {
        lock(&self.lines).join("\n")
    }

    pub fn system_lines(&self) -> Vec<String> {
        lock(&self.system).clone()
    }

    pub fn last_error(&self) -> Option<String> {
        lock(&self.errors).last().cloned()
    }
}

impl Output for RecordingOutput {
    fn text(&self, text: &str) {
        lock(&self.lines).push(text.to_string());
    }

    fn error(&self, error: &dyn std::error::Error) {
        lock(&self.errors).push(error.to_string());
    }

    fn system(&self, text: &str) {
        lock(&self.system).push(text.to_string());
    }

    fn describe(&self, overview: &str, commands: &[CommandSummary], help: Option<&str>) -> String {
        ColorOutput::plain().describe(overview, commands, help)
    }

    fn describe_list(&self, commands: &[CommandSummary]) -> String {
        ColorOutput::plain().describe_list(commands)
    }
}

/// Answers prompts from a queue; `None` once exhausted.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<String>>,
}

impl ScriptedInput {
    pub fn push(&self, answer: &str) {
        lock(&self.answers).push_back(answer.to_string());
    }

    pub fn remaining(&self) -> usize {
        lock(&self.answers).len()
    }
}

impl InputReader for ScriptedInput {
    fn read_line(&self) -> io::Result<Option<String>> {
        Ok(lock(&self.answers).pop_front())
    }
}

/// Shell with canned responses; unknown command lines fail with status 127.
#[derive(Debug, Default)]
pub struct ScriptedShell {
    responses: Mutex<HashMap<String, Result<String, (i32, String)>>>,
    history: Mutex<Vec<(String, PathBuf)>>,
}

impl ScriptedShell {
    pub fn respond(&self, command_line: &str, stdout: &str) {
        lock(&self.responses).insert(command_line.to_string(), Ok(stdout.to_string()));
    }

    pub fn fail(&self, command_line: &str, status: i32, message: &str) {
        lock(&self.responses).insert(command_line.to_string(), Err((status, message.to_string())));
    }

    /// Command lines run so far, with their working directory.
    pub fn history(&self) -> Vec<(String, PathBuf)> {
        lock(&self.history).clone()
    }
}

impl Shell for ScriptedShell {
    fn run(&self, command_line: &str, dir: &Path) -> InfraResult<String> {
        lock(&self.history).push((command_line.to_string(), dir.to_path_buf()));
        match lock(&self.responses).get(command_line) {
            Some(Ok(stdout)) => Ok(stdout.clone()),
            Some(Err((status, message))) => Err(InfraError::Shell {
                status: *status,
                message: message.clone(),
            }),
            None => Err(InfraError::Shell {
                status: 127,
                message: format!("sh: command not found: {command_line}"),
            }),
        }
    }
}

/// A tool session wired to in-memory doubles.
pub struct Harness {
    pub tool: Tool,
    pub output: Arc<RecordingOutput>,
    pub input: Arc<ScriptedInput>,
    pub shell: Arc<ScriptedShell>,
}

impl Harness {
    pub fn new(settings: Settings, cli: ToolCli) -> Self {
        let output = Arc::new(RecordingOutput::default());
        let input = Arc::new(ScriptedInput::default());
        let shell = Arc::new(ScriptedShell::default());
        let services = ServiceContainer::with_deps(output.clone(), input.clone(), shell.clone());
        Self {
            tool: Tool::with_services(settings, cli, services),
            output,
            input,
            shell,
        }
    }

    /// Dispatch `arguments` given as string slices.
    pub fn run(&self, arguments: &[&str]) -> ApplicationResult<()> {
        let arguments: Vec<String> = arguments.iter().map(|s| s.to_string()).collect();
        self.tool.run(&arguments)
    }
}
