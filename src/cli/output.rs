//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::{Color, Colorize};
use itertools::Itertools;

use crate::infrastructure::traits::{CommandSummary, Output};

const PAD: &str = "  ";

/// Output sink for the terminal: text indented on stdout, errors on stderr.
#[derive(Debug, Clone)]
pub struct ColorOutput {
    color: bool,
}

impl ColorOutput {
    pub fn new() -> Self {
        Self { color: true }
    }

    /// Same layout without ANSI codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for ColorOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for ColorOutput {
    fn text(&self, text: &str) {
        println!("{PAD}{}", text.replace('\n', &format!("\n{PAD}")));
    }

    fn error(&self, error: &dyn std::error::Error) {
        eprintln!("{}", self.paint(&error.to_string(), Color::Red));
    }

    fn system(&self, text: &str) {
        println!("{}", self.paint(text, Color::Magenta));
    }

    fn describe(&self, overview: &str, commands: &[CommandSummary], help: Option<&str>) -> String {
        let mut description = format!("{}\n\n", self.paint(overview, Color::Cyan));
        if !commands.is_empty() {
            description.push_str(&self.describe_list(commands));
        }
        if let Some(help) = help {
            description.push_str(&format!("\n\n{}", self.paint(help, Color::Cyan)));
        }
        description
    }

    fn describe_list(&self, commands: &[CommandSummary]) -> String {
        let width = commands
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0);
        let splitter = self.paint(&format!("{PAD}>{PAD}"), Color::Magenta);
        commands
            .iter()
            .map(|c| {
                let name = self.paint(&format!("{:<width$}", c.name), Color::Green);
                format!("{PAD}{name}{splitter}{}", c.overview)
            })
            .join("\n")
    }
}

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}
