//! Storage adapters for Amity state
//!
//! This module provides the core [`Adapter`] trait and the bundled
//! [`InMemory`] implementation.
//!
//! The `Adapter` trait defines the interface for storing and retrieving
//! JSON-serialized values under string keys. This keeps the domain
//! components (directory, session, feed) independent of the specific
//! storage mechanism, the same way the original system swapped browser
//! local and session storage behind one strategy object.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::Result;

mod errors;
mod in_memory;

pub use errors::StorageError;
pub use in_memory::InMemory;

/// Adapter trait abstracting the underlying key-value storage mechanism.
///
/// Values are JSON text; callers serialize structures through the
/// [`get_json`]/[`set_json`] helpers. Storage unavailability is treated as
/// fatal and propagated; there is no retry layer since all bundled
/// adapters are local and deterministic.
///
/// All adapter implementations must be `Send` and `Sync` to allow sharing
/// across tasks.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Get a previously stored value, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value under a key, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Remove a previously stored value. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Delete all values in the storage.
    async fn reset(&self) -> Result<()>;
}

/// Get a value and deserialize it from JSON.
///
/// Returns `None` when the key is absent. A present but malformed value is
/// an error, not `None`; it indicates the store was corrupted outside this
/// library.
pub async fn get_json<T: DeserializeOwned>(adapter: &dyn Adapter, key: &str) -> Result<Option<T>> {
    match adapter.get(key).await? {
        Some(text) => {
            let value = serde_json::from_str(&text).map_err(|e| {
                StorageError::DeserializationFailed {
                    key: key.to_string(),
                    source: e,
                }
            })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Serialize a value to JSON and store it under a key.
pub async fn set_json<T: Serialize>(adapter: &dyn Adapter, key: &str, value: &T) -> Result<()> {
    let text = serde_json::to_string(value).map_err(|e| StorageError::SerializationFailed {
        key: key.to_string(),
        source: e,
    })?;
    adapter.set(key, text).await
}
