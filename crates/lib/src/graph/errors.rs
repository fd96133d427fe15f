//! Error types for the social graph

use thiserror::Error;

/// Errors that can occur during social graph operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GraphError {
    /// A friend operation was attempted while no user is in session.
    #[error("No existing user in session")]
    NoUserInSession,

    /// The base user or one of their friends could not be resolved.
    #[error("Invalid username in operation")]
    UserNotFound {
        /// The username that failed to resolve
        username: String,
    },
}

impl GraphError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GraphError::UserNotFound { .. })
    }

    /// Check if this error indicates no user was in session.
    pub fn is_no_session_error(&self) -> bool {
        matches!(self, GraphError::NoUserInSession)
    }
}

// Conversion from GraphError to the main Error type
impl From<GraphError> for crate::Error {
    fn from(err: GraphError) -> Self {
        crate::Error::Graph(err)
    }
}
