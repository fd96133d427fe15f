//! Error types for the storage layer.
//!
//! This module defines structured error types for adapter operations,
//! providing error context and type safety over string-based errors.

use thiserror::Error;

/// Errors that can occur during storage adapter operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StorageError {
    /// Serialization of a value failed before storing it.
    #[error("Serialization failed for key '{key}'")]
    SerializationFailed {
        /// The key the value was being stored under
        key: String,
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// A stored value could not be deserialized.
    #[error("Deserialization failed for key '{key}'")]
    DeserializationFailed {
        /// The key the value was read from
        key: String,
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// File I/O failed while snapshotting or loading adapter state.
    #[error("File I/O error")]
    FileIo {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The underlying store is unavailable.
    #[error("Storage unavailable: {reason}")]
    Unavailable {
        /// Description of why the store cannot be used
        reason: String,
    },
}

impl StorageError {
    /// Check if this error is related to I/O operations.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            StorageError::FileIo { .. } | StorageError::Unavailable { .. }
        )
    }

    /// Check if this error is related to serialization.
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            StorageError::SerializationFailed { .. } | StorageError::DeserializationFailed { .. }
        )
    }

    /// Get the key if this error is about a specific stored value.
    pub fn key(&self) -> Option<&str> {
        match self {
            StorageError::SerializationFailed { key, .. }
            | StorageError::DeserializationFailed { key, .. } => Some(key),
            _ => None,
        }
    }
}

// Conversion from StorageError to the main Error type
impl From<StorageError> for crate::Error {
    fn from(err: StorageError) -> Self {
        crate::Error::Storage(err)
    }
}
