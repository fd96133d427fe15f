//! Social graph for Amity
//!
//! Friend-list operations layered on the directory and the session. The
//! friends list lives inside the user record; this component mutates it
//! through [`Directory::update_user`], so every change persists and emits
//! the usual update notification.

pub mod errors;

use std::{collections::HashMap, sync::Arc};

use crate::{
    Error, Result,
    api::Internal,
    directory::{Directory, User, UserPatch},
};

pub use errors::GraphError;

/// Friend-list operations for the session user.
///
/// `SocialGraph` is a lightweight handle; get one from
/// [`Api::graph`](crate::Api::graph).
pub struct SocialGraph {
    internal: Arc<Internal>,
}

impl SocialGraph {
    pub(crate) fn new(internal: Arc<Internal>) -> Self {
        Self { internal }
    }

    fn directory(&self) -> Directory {
        Directory::new(self.internal.clone())
    }

    fn session_user(&self) -> Result<User> {
        self.internal
            .session
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| GraphError::NoUserInSession.into())
    }

    /// Add a friend to the session user's friends list.
    ///
    /// The target must exist in the directory at insertion time; an
    /// unknown username fails with [`GraphError::UserNotFound`]. No
    /// duplicate check is performed — adding the same friend twice yields
    /// two entries, matching the behavior feeds have always shown.
    /// Returns the merged session user record.
    pub async fn add_friend(&self, username: &str) -> Result<User> {
        let current = self.session_user()?;

        // Insertion-time integrity check: friends must resolve.
        self.directory()
            .get_user(username)
            .await
            .map_err(|e| self.translate_lookup(e, username))?;

        let mut friends = current.friends;
        friends.push(username.to_string());

        let patch = UserPatch {
            username: current.username,
            friends: Some(friends),
            ..UserPatch::default()
        };
        let merged = self.directory().update_user(patch).await?;
        tracing::debug!(username = %merged.username, friend = %username, "friend added");
        Ok(merged)
    }

    /// Remove the first occurrence of a friend from the session user's
    /// friends list.
    ///
    /// Removing a username that is not in the list is an explicit no-op:
    /// the unchanged record is returned and no update (and therefore no
    /// notification) happens.
    pub async fn remove_friend(&self, username: &str) -> Result<User> {
        let current = self.session_user()?;

        let mut friends = current.friends.clone();
        let Some(index) = friends.iter().position(|f| f == username) else {
            tracing::debug!(
                username = %current.username,
                friend = %username,
                "remove_friend: not in friends list, no-op"
            );
            return Ok(current);
        };
        friends.remove(index);

        let patch = UserPatch {
            username: current.username,
            friends: Some(friends),
            ..UserPatch::default()
        };
        let merged = self.directory().update_user(patch).await?;
        tracing::debug!(username = %merged.username, friend = %username, "friend removed");
        Ok(merged)
    }

    /// Resolve every friend of a username.
    ///
    /// Fails with [`GraphError::UserNotFound`] if the base username or
    /// any of its friends fails to resolve. Returns a mapping from friend
    /// username to friend record; iteration order is map order, not
    /// friends-list order.
    pub async fn friends_of(&self, username: &str) -> Result<HashMap<String, User>> {
        let user = self
            .directory()
            .get_user(username)
            .await
            .map_err(|e| self.translate_lookup(e, username))?;

        let mut friends = HashMap::with_capacity(user.friends.len());
        for friend_username in &user.friends {
            let friend = self
                .directory()
                .get_user(friend_username)
                .await
                .map_err(|e| self.translate_lookup(e, friend_username))?;
            friends.insert(friend_username.clone(), friend);
        }
        Ok(friends)
    }

    /// Map a directory not-found to the graph's own error kind, leaving
    /// other errors untouched.
    fn translate_lookup(&self, e: Error, username: &str) -> Error {
        if e.is_not_found() {
            GraphError::UserNotFound {
                username: username.to_string(),
            }
            .into()
        } else {
            e
        }
    }
}
