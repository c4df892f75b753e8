//! Domain layer: aliases, dynamic content and lookup errors
//!
//! This layer is independent of external concerns (no terminal, no process spawning).

pub mod alias;
pub mod content;
pub mod error;

pub use alias::{Alias, AliasTable};
pub use content::{DynamicContent, FileConfig, Memory};
pub use error::DomainError;
