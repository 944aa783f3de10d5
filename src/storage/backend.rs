//! Key-value backends for bookmark storage.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::BackendError;

/// A key-value store holding arbitrary JSON values.
///
/// Mirrors the editor's workspace state: reads are infallible and absent
/// keys read as `None`, writes may fail.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Value>;

    fn update(&mut self, key: &str, value: Value) -> Result<(), BackendError>;

    /// Writes several keys as one batch.
    ///
    /// The default implementation issues the writes one by one; backends that
    /// can apply a batch atomically should override it.
    fn update_many(&mut self, entries: Vec<(String, Value)>) -> Result<(), BackendError> {
        for (key, value) in entries {
            self.update(&key, value)?;
        }
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Option<Value> {
        (**self).get(key)
    }

    fn update(&mut self, key: &str, value: Value) -> Result<(), BackendError> {
        (**self).update(key, value)
    }

    fn update_many(&mut self, entries: Vec<(String, Value)>) -> Result<(), BackendError> {
        (**self).update_many(entries)
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-process store, used for tests and hosts that persist elsewhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn update(&mut self, key: &str, value: Value) -> Result<(), BackendError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

// ============================================================================
// JsonFileStore
// ============================================================================

/// Store kept as a single JSON object in a file.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so a batch from [`KeyValueStore::update_many`] lands completely or
/// not at all.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, BackendError> {
        let path = path.into();
        let values: BTreeMap<String, Value> = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), keys = values.len(), "opened bookmark store");
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&mut self, values: BTreeMap<String, Value>) -> Result<(), BackendError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, serde_json::to_vec_pretty(&values)?)?;
        fs::rename(&tmp_path, &self.path)?;

        self.values = values;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn update(&mut self, key: &str, value: Value) -> Result<(), BackendError> {
        self.update_many(vec![(key.to_string(), value)])
    }

    fn update_many(&mut self, entries: Vec<(String, Value)>) -> Result<(), BackendError> {
        let mut values = self.values.clone();
        values.extend(entries);
        self.write_all(values)
    }
}
