//! Error types for the user directory

use thiserror::Error;

/// Errors that can occur during directory operations.
///
/// The `Display` strings are the human descriptions hosting UIs show
/// verbatim, so they stay short and user-facing.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No record exists for the username named in an operation.
    #[error("Invalid username in operation")]
    UserNotFound {
        /// The username that was not found
        username: String,
    },

    /// A record already exists for the username being created.
    #[error("The user already exists")]
    UserAlreadyExists {
        /// The username that already exists
        username: String,
    },
}

impl DirectoryError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DirectoryError::UserNotFound { .. })
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        matches!(self, DirectoryError::UserAlreadyExists { .. })
    }

    /// Get the username this error is about.
    pub fn username(&self) -> &str {
        match self {
            DirectoryError::UserNotFound { username }
            | DirectoryError::UserAlreadyExists { username } => username,
        }
    }
}

// Conversion from DirectoryError to the main Error type
impl From<DirectoryError> for crate::Error {
    fn from(err: DirectoryError) -> Self {
        crate::Error::Directory(err)
    }
}
