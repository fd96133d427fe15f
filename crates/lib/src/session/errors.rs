//! Error types for the session manager

use thiserror::Error;

/// Errors that can occur during session operations.
///
/// The `Display` strings are the human descriptions hosting UIs show
/// verbatim. Note that a failed user lookup during login surfaces as
/// [`SessionError::InvalidUsername`], not as a directory not-found error;
/// the caller of login asked about credentials, not about the directory.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SessionError {
    /// Login was attempted with a username the directory does not know.
    #[error("Invalid username")]
    InvalidUsername,

    /// Login was attempted with the wrong password.
    #[error("Invalid password")]
    InvalidPassword,

    /// Login was attempted while a user is already authenticated.
    #[error("A user is already in session")]
    UserInSession,

    /// Logout (or another session-requiring operation) was attempted
    /// while no user is authenticated.
    #[error("No existing user in session")]
    NoUserInSession,

    /// Registration was attempted for a username that already exists.
    #[error("The user already exists")]
    UserAlreadyExists {
        /// The username that already exists
        username: String,
    },
}

impl SessionError {
    /// Check if this error indicates a credential or session-state
    /// failure during authentication.
    pub fn is_authentication_error(&self) -> bool {
        matches!(
            self,
            SessionError::InvalidUsername
                | SessionError::InvalidPassword
                | SessionError::UserInSession
        )
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        matches!(self, SessionError::UserAlreadyExists { .. })
    }

    /// Check if this error indicates the login username was unknown.
    pub fn is_invalid_username(&self) -> bool {
        matches!(self, SessionError::InvalidUsername)
    }

    /// Check if this error indicates no user was in session.
    pub fn is_no_session_error(&self) -> bool {
        matches!(self, SessionError::NoUserInSession)
    }
}

// Conversion from SessionError to the main Error type
impl From<SessionError> for crate::Error {
    fn from(err: SessionError) -> Self {
        crate::Error::Session(err)
    }
}
