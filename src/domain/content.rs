//! Dynamic key/value content
//!
//! Loosely typed values addressed by string key. Callers go through typed
//! accessors that return `None` for a missing key as well as for a value of
//! another type.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Read access shared by file-backed config and in-process memory.
pub trait DynamicContent {
    /// Snapshot of the whole mapping.
    fn content(&self) -> Map<String, Value>;

    fn get(&self, key: &str) -> Option<Value> {
        self.content().get(key).cloned()
    }

    fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_str().map(str::to_string))
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_i64())
    }

    fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.as_f64())
    }

    fn get_array(&self, key: &str) -> Option<Vec<Value>> {
        self.get(key).and_then(|v| v.as_array().cloned())
    }

    fn keys(&self) -> Vec<String> {
        self.content().keys().cloned().collect()
    }

    /// Compact JSON rendering, `{}` when empty.
    fn describe(&self) -> String {
        Value::Object(self.content()).to_string()
    }
}

/// JSON object loaded from a file. Anything other than a readable JSON object
/// yields an empty mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileConfig {
    path: PathBuf,
    content: Map<String, Value>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(text) => parse_object(&text, path),
            Err(e) => {
                debug!("no local config at {}: {}", path.display(), e);
                Map::new()
            }
        };
        Self {
            path: path.to_path_buf(),
            content,
        }
    }

    /// `<name>.json` in the current working directory.
    pub fn local(name: &str) -> Self {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load(&dir.join(format!("{name}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_object(text: &str, path: &Path) -> Map<String, Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("ignoring {}: top level is not an object", path.display());
            Map::new()
        }
        Err(e) => {
            warn!("ignoring {}: {}", path.display(), e);
            Map::new()
        }
    }
}

impl DynamicContent for FileConfig {
    fn content(&self) -> Map<String, Value> {
        self.content.clone()
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.content.get(key).cloned()
    }
}

/// Scratch storage living for one session, writable through a shared reference.
#[derive(Debug, Default)]
pub struct Memory {
    content: Mutex<Map<String, Value>>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Map<String, Value>> {
        self.content.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store `value` under `key`, returning the previous value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.lock().insert(key.into(), value.into())
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.lock().remove(key)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl DynamicContent for Memory {
    fn content(&self) -> Map<String, Value> {
        self.lock().clone()
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }
}
