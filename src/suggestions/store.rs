//! Key-value preference stores
//!
//! Values are lists of strings, read and written whole.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use tracing::debug;

/// Trait for key-value preference backends
pub trait PreferenceStore: Send + Sync {
    /// Read the list stored under `key`, `None` if nothing is stored
    fn list(&self, key: &str) -> Result<Option<Vec<String>>>;

    /// Replace the list stored under `key`
    fn set_list(&self, key: &str, value: Vec<String>) -> Result<()>;
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn list(&self, key: &str) -> Result<Option<Vec<String>>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn set_list(&self, key: &str, value: Vec<String>) -> Result<()> {
        self.entries.write().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a single JSON object file
///
/// Keys holding values other than string lists are preserved on write but
/// read as absent.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, serde_json::Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let entries = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(entries)
    }

    fn write_all(&self, entries: &BTreeMap<String, serde_json::Value>) -> Result<()> {
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        // Unique temp file in the target directory, renamed over the target
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("creating temp file in {}", parent.display()))?;
        temp_file.write_all(&serde_json::to_vec_pretty(entries)?)?;
        temp_file
            .persist(&self.path)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn list(&self, key: &str) -> Result<Option<Vec<String>>> {
        let _guard = self.lock.lock().unwrap();
        let entries = self.read_all()?;
        Ok(entries
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok()))
    }

    fn set_list(&self, key: &str, value: Vec<String>) -> Result<()> {
        let _guard = self.lock.lock().unwrap();
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), serde_json::to_value(&value)?);
        self.write_all(&entries)?;
        debug!("Stored {} entries under {}", value.len(), key);
        Ok(())
    }
}
