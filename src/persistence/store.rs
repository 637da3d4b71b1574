use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// String key-value store persisted as one JSON object
///
/// Reads never fail: a missing or corrupt file opens as an empty store.
/// Writes are best-effort and go through [`crate::persistence::atomic_write`].
#[derive(Debug, Clone)]
pub struct KvStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl KvStore {
    /// Open the store at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match crate::persistence::read_file(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "store: corrupt file, starting empty");
                BTreeMap::new()
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "store: unreadable file, starting empty");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }

    /// Write all entries to disk
    pub fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        crate::persistence::atomic_write(&self.path, &json)?;
        Ok(())
    }
}
