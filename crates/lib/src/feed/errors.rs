//! Error types for the feed

use thiserror::Error;

/// Errors that can occur during feed operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FeedError {
    /// No post exists under the requested id.
    #[error("The post couldn't be found")]
    PostNotFound {
        /// The post id that failed to resolve
        id: String,
    },

    /// A session-requiring feed operation was attempted while no user is
    /// in session.
    #[error("No existing user in session")]
    NoUserInSession,
}

impl FeedError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FeedError::PostNotFound { .. })
    }

    /// Check if this error indicates no user was in session.
    pub fn is_no_session_error(&self) -> bool {
        matches!(self, FeedError::NoUserInSession)
    }
}

// Conversion from FeedError to the main Error type
impl From<FeedError> for crate::Error {
    fn from(err: FeedError) -> Self {
        crate::Error::Feed(err)
    }
}
