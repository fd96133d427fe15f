use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Result;
use crate::storage::{Adapter, StorageError};

/// A simple in-memory adapter using a `HashMap` for storage.
///
/// This adapter is suitable for testing, development, or scenarios where
/// data persistence is handled externally by saving/loading the entire
/// state to/from a file. It is the library's stand-in for the browser
/// local storage the original system persisted into.
///
/// It provides basic persistence capabilities via `save_to_file` and
/// `load_from_file`, serializing the `HashMap` to JSON.
#[derive(Debug, Default)]
pub struct InMemory {
    /// Values storage with read-write lock for concurrent access
    values: RwLock<HashMap<String, String>>,
}

/// Serializable snapshot of the adapter state for persistence
#[derive(Serialize, Deserialize)]
struct Snapshot {
    values: HashMap<String, String>,
}

impl Serialize for InMemory {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let values = self.values.read().unwrap().clone();
        Snapshot { values }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for InMemory {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let snapshot = Snapshot::deserialize(deserializer)?;
        Ok(InMemory {
            values: RwLock::new(snapshot.values),
        })
    }
}

impl InMemory {
    /// Creates a new, empty `InMemory` adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves the entire adapter state to a specified file as JSON.
    ///
    /// # Arguments
    /// * `path` - The path to the file where the state should be saved.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            StorageError::SerializationFailed {
                key: path.as_ref().display().to_string(),
                source: e,
            }
        })?;
        fs::write(path, json).map_err(|e| StorageError::FileIo { source: e }.into())
    }

    /// Loads the adapter state from a specified JSON file.
    ///
    /// If the file does not exist, a new, empty `InMemory` adapter is
    /// returned.
    ///
    /// # Arguments
    /// * `path` - The path to the file from which to load the state.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            return Ok(Self::new());
        }

        let json =
            fs::read_to_string(&path).map_err(|e| StorageError::FileIo { source: e })?;
        let adapter: Self =
            serde_json::from_str(&json).map_err(|e| StorageError::DeserializationFailed {
                key: path.as_ref().display().to_string(),
                source: e,
            })?;

        Ok(adapter)
    }

    /// Returns a vector containing all keys currently stored.
    pub fn all_keys(&self) -> Vec<String> {
        let values = self.values.read().unwrap();
        values.keys().cloned().collect()
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.values.read().unwrap().len()
    }

    /// Check if the adapter holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.read().unwrap().is_empty()
    }
}

#[async_trait]
impl Adapter for InMemory {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().unwrap();
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut values = self.values.write().unwrap();
        values.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().unwrap();
        values.remove(key);
        Ok(())
    }

    async fn reset(&self) -> Result<()> {
        let mut values = self.values.write().unwrap();
        values.clear();
        Ok(())
    }
}
