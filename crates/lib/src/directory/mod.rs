//! User directory for Amity
//!
//! The directory is the authoritative mapping of username to user record.
//! Every mutation persists the full mapping to the storage adapter under a
//! fixed key and keeps the session copy consistent with directory edits.

pub mod errors;
pub mod types;

use std::sync::Arc;

use crate::{Result, api::Internal, events::Event};

pub use errors::DirectoryError;
pub use types::{PublicUser, SearchCriteria, User, UserPatch};

/// CRUD over the username-to-user mapping.
///
/// `Directory` is a lightweight handle; get one from
/// [`Api::directory`](crate::Api::directory). Mutations persist the full
/// mapping and emit [`Event::UserUpdated`] notifications. Most callers
/// want the session, graph, or feed components instead; use the directory
/// directly only for registration-adjacent flows and search.
pub struct Directory {
    internal: Arc<Internal>,
}

impl Directory {
    pub(crate) fn new(internal: Arc<Internal>) -> Self {
        Self { internal }
    }

    /// Add a new user to the records.
    ///
    /// Fails with [`DirectoryError::UserAlreadyExists`] if the username is
    /// taken. Returns the stored record.
    pub async fn add_user(&self, user: User) -> Result<User> {
        {
            let mut users = self.internal.users.write().unwrap();
            if users.contains_key(&user.username) {
                return Err(DirectoryError::UserAlreadyExists {
                    username: user.username.clone(),
                }
                .into());
            }
            users.insert(user.username.clone(), user.clone());
        }
        self.internal.persist_users().await?;
        tracing::debug!(username = %user.username, "user added");
        Ok(user)
    }

    /// Update an existing user with a shallow field-by-field overwrite.
    ///
    /// Fails with [`DirectoryError::UserNotFound`] if no record exists for
    /// `patch.username`. Each set patch field replaces the stored field
    /// wholesale (this is a shallow merge, not a deep one). On success the
    /// merged record is persisted, the session copy is refreshed when it
    /// refers to the same user, a [`Event::UserUpdated`] notification is
    /// emitted, and a copy of the merged record is returned.
    pub async fn update_user(&self, patch: UserPatch) -> Result<User> {
        let merged = {
            let mut users = self.internal.users.write().unwrap();
            let user = users.get_mut(&patch.username).ok_or_else(|| {
                DirectoryError::UserNotFound {
                    username: patch.username.clone(),
                }
            })?;
            patch.apply_to(user);
            user.clone()
        };
        self.internal.persist_users().await?;

        // Keep the session copy consistent with directory edits.
        let session_matches = {
            let mut session = self.internal.session.write().unwrap();
            match session.as_mut() {
                Some(current) if current.username == merged.username => {
                    *current = merged.clone();
                    true
                }
                _ => false,
            }
        };
        if session_matches {
            self.internal.persist_session().await?;
        }

        self.internal.emit(&Event::UserUpdated(merged.clone()));
        tracing::debug!(username = %merged.username, "user updated");
        Ok(merged)
    }

    /// Get a copy of a user record, including the password field.
    ///
    /// Fails with [`DirectoryError::UserNotFound`] if absent. The returned
    /// copy is detached; mutating it does not affect the directory.
    pub async fn get_user(&self, username: &str) -> Result<User> {
        let users = self.internal.users.read().unwrap();
        users
            .get(username)
            .cloned()
            .ok_or_else(|| {
                DirectoryError::UserNotFound {
                    username: username.to_string(),
                }
                .into()
            })
    }

    /// Search users by criteria.
    ///
    /// Returns the password-stripped records matching the criteria,
    /// ordered by username. Never fails; no match is an empty vec.
    pub async fn search_user(&self, criteria: &SearchCriteria) -> Result<Vec<PublicUser>> {
        let users = self.internal.users.read().unwrap();
        let mut matched: Vec<PublicUser> = users
            .values()
            .map(User::to_public)
            .filter(|user| criteria.matches(user))
            .collect();
        matched.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(matched)
    }
}
