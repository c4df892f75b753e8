//! Alias table: shorthand tokens that expand into argument vectors

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A configured shorthand, e.g. `name = "up"`, `command = "core update"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    pub command: String,
}

impl Alias {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }

    /// Replace the alias token with its whitespace-split command, keeping `rest` verbatim.
    pub fn expand(&self, rest: &[String]) -> Vec<String> {
        self.command
            .split_whitespace()
            .map(str::to_string)
            .chain(rest.iter().cloned())
            .collect()
    }
}

/// Ordered alias mapping. Duplicate names are representable so that they can be
/// reported instead of silently shadowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    aliases: Vec<Alias>,
}

impl AliasTable {
    pub fn new(aliases: Vec<Alias>) -> Self {
        Self { aliases }
    }

    /// Look up `candidate`.
    ///
    /// Returns `Ok(None)` when no alias matches and `AmbiguousAlias` when more than one does.
    pub fn resolve(&self, candidate: &str) -> Result<Option<&Alias>, DomainError> {
        let mut matches = self.aliases.iter().filter(|a| a.name == candidate);
        match (matches.next(), matches.next()) {
            (None, _) => Ok(None),
            (Some(alias), None) => Ok(Some(alias)),
            (Some(_), Some(_)) => Err(DomainError::AmbiguousAlias(candidate.to_string())),
        }
    }

    /// Expand the leading token for as long as it names an alias. `stop` (the tool's
    /// own name) is never treated as an alias.
    ///
    /// Fails with `AliasCycle` when an alias turns up a second time.
    pub fn expand_all(&self, arguments: &[String], stop: &str) -> Result<Vec<String>, DomainError> {
        let mut current = arguments.to_vec();
        let mut seen: Vec<&str> = Vec::new();
        loop {
            let alias = match current.split_first() {
                Some((first, _)) if first != stop => match self.resolve(first)? {
                    Some(alias) => alias,
                    None => return Ok(current),
                },
                _ => return Ok(current),
            };
            if seen.contains(&alias.name.as_str()) {
                return Err(DomainError::AliasCycle(alias.name.clone()));
            }
            seen.push(&alias.name);
            current = alias.expand(&current[1..]);
        }
    }
}
