//! Command index: an immutable tree mirroring the declared commands
//!
//! Built once per session. Supports exact path walks, whole-tree name search
//! and the indented help rendering.

use std::fmt;
use std::sync::Arc;

use crate::application::Command;
use crate::domain::DomainError;

const PAD: &str = "  ";

/// One position in the command tree.
pub struct Node {
    path: Vec<String>,
    command: Arc<dyn Command>,
    children: Vec<Node>,
}

impl Node {
    /// Root node with path `[root name]`; the whole tree is materialized here.
    pub fn root(command: Arc<dyn Command>) -> Self {
        let path = vec![command.name().to_string()];
        Self::new(path, command)
    }

    fn new(path: Vec<String>, command: Arc<dyn Command>) -> Self {
        let children = command
            .commands()
            .into_iter()
            .map(|child| {
                let mut child_path = path.clone();
                child_path.push(child.name().to_string());
                Node::new(child_path, child)
            })
            .collect();
        Self {
            path,
            command,
            children,
        }
    }

    pub fn name(&self) -> &str {
        self.command.name()
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn path_description(&self) -> String {
        self.path.join(" ")
    }

    pub fn command(&self) -> &Arc<dyn Command> {
        &self.command
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// This node if it is named `name`, else the first match in a depth-first,
    /// declaration-order walk of the subtree.
    pub fn find_first(&self, name: &str) -> Option<&Node> {
        if self.name() == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_first(name))
    }

    /// Every node in the subtree (self included) named `name`, pre-order.
    pub fn find_all(&self, name: &str) -> Vec<&Node> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a Node>) {
        if self.name() == name {
            found.push(self);
        }
        for child in &self.children {
            child.collect_named(name, found);
        }
    }

    /// Header, overview, indented subtree listing and help text.
    pub fn description(&self) -> String {
        let mut result = format!("# {}\n> {}", self.path_description(), self.command.overview());
        if !self.children.is_empty() {
            let children = self.children_description(1);
            result.push_str("\n\n");
            result.push_str(children.trim_matches('\n'));
        }
        if let Some(help) = self.command.help() {
            result.push_str("\n\n");
            result.push_str(&help);
        }
        result
    }

    /// One line per direct child, names padded to the widest sibling; nested
    /// levels are set off by blank lines and indented one step further.
    pub fn children_description(&self, indent: usize) -> String {
        let width = self
            .children
            .iter()
            .map(|c| c.name().chars().count())
            .max()
            .unwrap_or(0);
        let splitter = format!("{PAD}>{PAD}");

        let mut result = String::new();
        for child in &self.children {
            result.push_str(&PAD.repeat(indent));
            result.push_str(&format!("{:<width$}", child.name()));
            result.push_str(&splitter);
            result.push_str(&child.command.overview());
            result.push('\n');
            if !child.children.is_empty() {
                result.push('\n');
                result.push_str(&child.children_description(indent + 1));
                result.push('\n');
            }
        }
        result
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("path", &self.path)
            .field("children", &self.children)
            .finish()
    }
}

/// Owns the root node for the lifetime of a session.
#[derive(Debug)]
pub struct Index {
    root: Node,
}

impl Index {
    pub fn new(root: Arc<dyn Command>) -> Self {
        Self {
            root: Node::root(root),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// All nodes named `name` anywhere in the tree; empty when there is none.
    pub fn search_all(&self, name: &str) -> Vec<&Node> {
        self.root.find_all(name)
    }

    /// Walk `arguments` one at a time, each resolved with `find_first` on the node
    /// reached so far. Fails at the first argument with no match in that subtree.
    pub fn search_exact(&self, arguments: &[String]) -> Result<&Node, DomainError> {
        let mut node = &self.root;
        for arg in arguments {
            node = node
                .find_first(arg)
                .ok_or_else(|| DomainError::not_found(node.name(), arg.as_str()))?;
        }
        Ok(node)
    }
}
