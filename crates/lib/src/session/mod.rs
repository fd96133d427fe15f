//! Session management for Amity
//!
//! Tracks at most one authenticated user per [`Api`](crate::Api),
//! restores it from the persisted session pointer at startup, and
//! enforces the route-level access policy the navigation layer consults
//! on every navigation.

pub mod errors;

use std::sync::Arc;

use crate::{
    Error, Result,
    api::Internal,
    directory::{Directory, PublicUser, User},
    events::Event,
};

pub use errors::SessionError;

/// Coarse session status derived from the session pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SessionStatus {
    /// No user is authenticated.
    Guest,
    /// A user is authenticated.
    Authenticated,
}

/// A route-level requirement on session status.
///
/// The navigation layer attaches a policy to each guarded route and asks
/// [`SessionManager::authorize`] to validate it on every navigation; a
/// violation yields the configured redirect target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    /// The status the session must have for the route to be allowed
    pub required: SessionStatus,
    /// Route to redirect to when the policy is violated
    pub on_fail: String,
}

impl RoutePolicy {
    /// A policy allowing only authenticated users, redirecting elsewhere
    /// (typically the login route) on violation.
    pub fn authenticated(on_fail: impl Into<String>) -> Self {
        Self {
            required: SessionStatus::Authenticated,
            on_fail: on_fail.into(),
        }
    }

    /// A policy allowing only guests, redirecting elsewhere (typically
    /// the home route) on violation.
    pub fn guest(on_fail: impl Into<String>) -> Self {
        Self {
            required: SessionStatus::Guest,
            on_fail: on_fail.into(),
        }
    }
}

/// The session state machine: guest or authenticated.
///
/// `SessionManager` is a lightweight handle; get one from
/// [`Api::session`](crate::Api::session). Login and logout persist the
/// session pointer through the adapter so the state survives restarts.
pub struct SessionManager {
    internal: Arc<Internal>,
}

impl SessionManager {
    pub(crate) fn new(internal: Arc<Internal>) -> Self {
        Self { internal }
    }

    fn directory(&self) -> Directory {
        Directory::new(self.internal.clone())
    }

    /// Register a new user.
    ///
    /// Creates the record with an empty friends list through the
    /// directory. Fails with [`SessionError::UserAlreadyExists`] when the
    /// username is taken. Registration does not authenticate; call
    /// [`login`](Self::login) afterwards.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        name: &str,
        email: &str,
    ) -> Result<PublicUser> {
        let user = User::new(username, password, name, email);
        let stored = self.directory().add_user(user).await.map_err(|e| match e {
            Error::Directory(directory_err) if directory_err.is_conflict() => {
                SessionError::UserAlreadyExists {
                    username: username.to_string(),
                }
                .into()
            }
            other => other,
        })?;
        tracing::debug!(username = %stored.username, "user registered");
        Ok(stored.to_public())
    }

    /// Login an existing user.
    ///
    /// Fails with [`SessionError::UserInSession`] when already
    /// authenticated, [`SessionError::InvalidUsername`] when the username
    /// is unknown, and [`SessionError::InvalidPassword`] on a password
    /// mismatch. On success the session pointer is persisted, a
    /// [`Event::LoginSuccess`] notification is emitted, and the
    /// password-stripped user is returned.
    pub async fn login(&self, username: &str, password: &str) -> Result<PublicUser> {
        if self.internal.session.read().unwrap().is_some() {
            return Err(SessionError::UserInSession.into());
        }

        let user = self.directory().get_user(username).await.map_err(|e| {
            if e.is_not_found() {
                SessionError::InvalidUsername.into()
            } else {
                e
            }
        })?;

        if user.password != password {
            return Err(SessionError::InvalidPassword.into());
        }

        *self.internal.session.write().unwrap() = Some(user.clone());
        self.internal.persist_session().await?;

        let public = user.to_public();
        self.internal.emit(&Event::LoginSuccess(public.clone()));
        tracing::debug!(username = %public.username, "login success");
        Ok(public)
    }

    /// Logout the user in session.
    ///
    /// Fails with [`SessionError::NoUserInSession`] when no user is
    /// authenticated. On success the persisted session pointer is removed
    /// and a [`Event::LogoutSuccess`] notification is emitted.
    pub async fn logout(&self) -> Result<()> {
        {
            let mut session = self.internal.session.write().unwrap();
            if session.is_none() {
                return Err(SessionError::NoUserInSession.into());
            }
            *session = None;
        }
        self.internal.persist_session().await?;
        self.internal.emit(&Event::LogoutSuccess);
        tracing::debug!("logout success");
        Ok(())
    }

    /// Get a password-stripped copy of the session user, or `None` when
    /// no user is authenticated.
    pub fn current_user(&self) -> Option<PublicUser> {
        self.internal
            .session
            .read()
            .unwrap()
            .as_ref()
            .map(User::to_public)
    }

    /// Get the current session status.
    ///
    /// Recomputed from the session pointer on every call; it is derived
    /// state, never a cached copy that could drift.
    pub fn status(&self) -> SessionStatus {
        if self.internal.session.read().unwrap().is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Guest
        }
    }

    /// Check whether the current status equals the given status.
    pub fn is_status_allowed(&self, status: SessionStatus) -> bool {
        self.status() == status
    }

    /// Validate a route policy against the current status.
    ///
    /// Returns `None` when the route is allowed, or the configured
    /// redirect target when the policy is violated. The navigation layer
    /// is expected to call this on every navigation and follow the
    /// returned redirect.
    pub fn authorize(&self, policy: &RoutePolicy) -> Option<String> {
        if self.is_status_allowed(policy.required) {
            None
        } else {
            tracing::debug!(on_fail = %policy.on_fail, "route policy violated");
            Some(policy.on_fail.clone())
        }
    }
}
