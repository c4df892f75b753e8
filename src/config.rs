//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/<app>/<app>.toml`
//! 3. Environment variables: `<APP>_*` prefix
//!
//! The per-directory `<app>.json` key/value file is separate, see [`FileConfig`].
//!
//! [`FileConfig`]: crate::domain::FileConfig

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Alias, DynamicContent};

/// Unified configuration for a tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Reported by `core version`
    pub version: String,
    /// Upstream repository merged by `core update`
    pub source_url: String,
    /// Checkout the `make` targets run in
    pub source_dir: PathBuf,
    /// Install location used by `core reload`
    pub bin_dir: PathBuf,
    /// Shorthands consulted before command lookup
    pub aliases: Vec<Alias>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::defaults_for(env!("CARGO_PKG_NAME"))
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub version: Option<String>,
    pub source_url: Option<String>,
    pub source_dir: Option<PathBuf>,
    pub bin_dir: Option<PathBuf>,
    pub aliases: Option<Vec<Alias>>,
}

/// Get the XDG config directory for `app`.
pub fn global_config_dir(app: &str) -> Option<PathBuf> {
    ProjectDirs::from("", "", app).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file of `app`.
pub fn global_config_path(app: &str) -> Option<PathBuf> {
    global_config_dir(app).map(|dir| dir.join(format!("{app}.toml")))
}

/// Environment variable prefix: `my-tool` -> `MY_TOOL`.
pub fn env_prefix(app: &str) -> String {
    app.to_uppercase().replace('-', "_")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the input untouched.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Compiled defaults for `app`.
    pub fn defaults_for(app: &str) -> Self {
        let source_dir = directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(format!(".{app}")))
            .unwrap_or_else(|| PathBuf::from(format!("~/.{app}")));
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            source_url: String::new(),
            source_dir,
            bin_dir: PathBuf::from("/usr/local/bin"),
            aliases: Vec::new(),
        }
    }

    /// Overlay wins where it specifies a value; a specified alias list replaces the base list.
    pub fn apply(&self, overlay: &RawSettings) -> Self {
        Self {
            version: overlay.version.clone().unwrap_or_else(|| self.version.clone()),
            source_url: overlay
                .source_url
                .clone()
                .unwrap_or_else(|| self.source_url.clone()),
            source_dir: overlay
                .source_dir
                .clone()
                .unwrap_or_else(|| self.source_dir.clone()),
            bin_dir: overlay.bin_dir.clone().unwrap_or_else(|| self.bin_dir.clone()),
            aliases: overlay
                .aliases
                .clone()
                .unwrap_or_else(|| self.aliases.clone()),
        }
    }

    /// Load settings for `app` with layered precedence.
    pub fn load(app: &str) -> ApplicationResult<Self> {
        let path = global_config_path(app).filter(|p| p.exists());
        Self::load_layers(app, path.as_deref())
    }

    /// Like [`Settings::load`] but with an explicit config file in place of the global one.
    pub fn load_from(app: &str, path: &Path) -> ApplicationResult<Self> {
        if !path.exists() {
            return Err(ApplicationError::Config {
                message: format!("config file not found: {}", path.display()),
            });
        }
        Self::load_layers(app, Some(path))
    }

    fn load_layers(app: &str, file: Option<&Path>) -> ApplicationResult<Self> {
        // 1. Start with defaults
        let mut current = Self::defaults_for(app);

        // 2. Config file
        if let Some(path) = file {
            debug!("loading config from {}", path.display());
            let raw = load_raw_settings(path)?;
            current = current.apply(&raw);
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(app, current)?;

        current.expand_paths();
        Ok(current)
    }

    /// Apply `<APP>_*` environment variables as explicit overrides.
    fn apply_env_overrides(app: &str, mut settings: Self) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(&env_prefix(app))
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("version") {
            settings.version = val;
        }
        if let Ok(val) = config.get_string("source_url") {
            settings.source_url = val;
        }
        if let Ok(val) = config.get_string("source_dir") {
            settings.source_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("bin_dir") {
            settings.bin_dir = PathBuf::from(val);
        }

        Ok(settings)
    }

    fn expand_paths(&mut self) {
        self.source_dir = expand_path(&self.source_dir);
        self.bin_dir = expand_path(&self.bin_dir);
    }

    /// Global settings followed by the local key/value content.
    pub fn describe(&self, local: &dyn DynamicContent) -> String {
        format!(
            "Global:\n    Source URL: {}\n    Source DIR: {}\n    Bin DIR: {}\nLocal:\n    {}",
            self.source_url,
            self.source_dir.display(),
            self.bin_dir.display(),
            local.describe()
        )
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template(app: &str) -> String {
        format!(
            r#"# {app} configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/{app}/{app}.toml
#   Env:    {prefix}_* environment variables (explicit overrides)

# Version reported by `core version`
# version = "0.1.0"

# Repository merged by `core update`
# source_url = "https://github.com/me/{app}.git"

# Checkout where `make edit|reload|update` run
# source_dir = "~/.{app}"

# Install location for `core reload`
# bin_dir = "/usr/local/bin"

# Shorthands, expanded before command lookup
# [[aliases]]
# name = "up"
# command = "core update"
"#,
            prefix = env_prefix(app)
        )
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
