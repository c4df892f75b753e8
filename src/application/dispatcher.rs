//! Dispatcher: turns an argument vector into exactly one command invocation
//!
//! Order of resolution for the first argument:
//! 1. empty vector or the tool's own name: the root describes the whole tool
//! 2. alias table: the first token is expanded until it is no longer an alias
//! 3. whole-tree search: a unique match runs, several matches prompt the user

use std::sync::{Arc, OnceLock};

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::index::{Index, Node};
use crate::application::{ApplicationError, ApplicationResult, Command, Tool};
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// Synthetic root of the index: the tool itself.
struct Root {
    name: String,
    overview: String,
    help: Option<String>,
    commands: Vec<Arc<dyn Command>>,
}

impl Command for Root {
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
        self.commands.clone()
    }
}

/// Command-line front of a tool: a `core` command plus user commands.
pub struct ToolCli {
    name: String,
    overview: String,
    help: Option<String>,
    core: Arc<dyn Command>,
    commands: Vec<Arc<dyn Command>>,
    index: OnceLock<Index>,
}

impl ToolCli {
    pub fn new(
        name: impl Into<String>,
        overview: impl Into<String>,
        core: Arc<dyn Command>,
        commands: Vec<Arc<dyn Command>>,
    ) -> Self {
        Self {
            name: name.into(),
            overview: overview.into(),
            help: None,
            core,
            commands,
            index: OnceLock::new(),
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn overview(&self) -> &str {
        &self.overview
    }

    /// `core` first, then the user commands in declaration order.
    pub fn commands(&self) -> Vec<Arc<dyn Command>> {
        std::iter::once(Arc::clone(&self.core))
            .chain(self.commands.iter().cloned())
            .collect()
    }

    /// Built on first use, immutable afterwards.
    pub fn index(&self) -> &Index {
        self.index.get_or_init(|| {
            debug!("building command index for {}", self.name);
            Index::new(Arc::new(Root {
                name: self.name.clone(),
                overview: self.overview.clone(),
                help: self.help.clone(),
                commands: self.commands(),
            }))
        })
    }

    #[instrument(level = "debug", skip(self, tool))]
    pub fn run(&self, arguments: &[String], tool: &Tool) -> ApplicationResult<()> {
        let arguments = tool.aliases().expand_all(arguments, &self.name)?;
        debug!("expanded: {:?}", arguments);
        let (first, next) = match arguments.split_first() {
            Some((first, next)) if *first != self.name => (first, next),
            _ => {
                let root = Arc::clone(self.index().root().command());
                return self.system_run(tool, "", || root.run(&[], tool));
            }
        };

        let node = self.select_node(first, tool)?;
        let header = node.path()[1..].iter().chain(next).join(" ");
        let command = Arc::clone(node.command());
        self.system_run(tool, &header, || command.run(next, tool))
    }

    /// Description for `help`: the whole tree, a searched name, or a strict path.
    #[instrument(level = "debug", skip(self, tool))]
    pub fn help_text(&self, arguments: &[String], tool: &Tool) -> ApplicationResult<String> {
        let node = match arguments {
            [] => self.index().root(),
            [query] => self.select_node(query, tool)?,
            path => self.index().search_exact(path)?,
        };
        Ok(node.description())
    }

    /// Header before, footer after, the footer also on failure.
    fn system_run(
        &self,
        tool: &Tool,
        header: &str,
        run: impl FnOnce() -> ApplicationResult<()>,
    ) -> ApplicationResult<()> {
        let output = tool.output();
        output.system(&format!("<< {} {}\n", self.name, header));
        let result = run();
        output.system("\n>> ");
        result
    }

    fn select_node(&self, query: &str, tool: &Tool) -> ApplicationResult<&Node> {
        let nodes = self.index().search_all(query);
        match nodes.len() {
            0 => Err(DomainError::not_found(self.name.as_str(), query).into()),
            1 => Ok(nodes[0]),
            _ => self.make_choice(nodes, tool),
        }
    }

    /// Blocks until the user answers. `0` cancels: `Cancelled` unwinds through any
    /// enclosing `system_run` (e.g. `core help <name>`), so that run's footer is
    /// still written before `launch` exits with 0.
    fn make_choice<'a>(&self, nodes: Vec<&'a Node>, tool: &Tool) -> ApplicationResult<&'a Node> {
        let mut choice = String::from("multiple commands found:\n\n");
        for (i, node) in nodes.iter().enumerate() {
            choice.push_str(&format!("{}: {}\n", i + 1, node.path_description()));
        }
        choice.push_str("\nchoose number (0 to cancel):");

        let output = tool.output();
        output.text(&choice);
        let line = tool
            .input()
            .read_line()
            .map_err(|e| InfraError::io("read choice", e))?;
        output.text("");

        let answer = line
            .as_deref()
            .and_then(|l| l.trim().parse::<i64>().ok())
            .unwrap_or(-1);
        debug!("choice: {}", answer);

        match answer {
            0 => Err(ApplicationError::Cancelled),
            n => n
                .checked_sub(1)
                .and_then(|i| usize::try_from(i).ok())
                .and_then(|i| nodes.get(i).copied())
                .ok_or(ApplicationError::InvalidChoice),
        }
    }
}
