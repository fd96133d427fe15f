//! Core data types for the user directory

use serde::{Deserialize, Serialize};

/// A user record as stored in the directory.
///
/// The username is the unique key. The password is stored in plain text
/// by explicit non-goal of this library; it is serialized under the
/// `__password` key to keep the persisted layout of the store unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique username (login identifier)
    pub username: String,

    /// Plain-text password, persisted as `__password`
    #[serde(rename = "__password")]
    pub password: String,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Usernames of this user's friends, in insertion order.
    ///
    /// Records created before the friends feature existed may lack the
    /// field in storage; it deserializes as empty.
    #[serde(default)]
    pub friends: Vec<String>,
}

impl User {
    /// Create a new user record with an empty friends list.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            name: name.into(),
            email: email.into(),
            friends: Vec::new(),
        }
    }

    /// Convert this record into its password-stripped projection.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            username: self.username.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            friends: self.friends.clone(),
        }
    }
}

/// A password-stripped projection of a [`User`].
///
/// Everything that leaves the session or search surface is a
/// `PublicUser`; there is no password field to leak.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    /// Unique username (login identifier)
    pub username: String,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Usernames of this user's friends, in insertion order
    #[serde(default)]
    pub friends: Vec<String>,
}

/// A partial user record for [`Directory::update_user`] shallow merges.
///
/// The username names the record to update and is never changed by a
/// merge. Each `Some` field overwrites the stored field wholesale; this
/// is a shallow merge, not a deep one — a `Some(friends)` replaces the
/// entire friends list.
///
/// [`Directory::update_user`]: super::Directory::update_user
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UserPatch {
    /// Username of the record to update
    pub username: String,

    /// New password, if changing
    pub password: Option<String>,

    /// New display name, if changing
    pub name: Option<String>,

    /// New email, if changing
    pub email: Option<String>,

    /// Replacement friends list, if changing
    pub friends: Option<Vec<String>>,
}

impl UserPatch {
    /// Create an empty patch for the given username.
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Overwrite the stored record's fields with this patch's set fields.
    pub(crate) fn apply_to(&self, user: &mut User) {
        if let Some(password) = &self.password {
            user.password = password.clone();
        }
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(friends) = &self.friends {
            user.friends = friends.clone();
        }
    }
}

/// Matching criteria for [`Directory::search_user`].
///
/// A free-text query matched case-insensitively as a substring against
/// username, name, and email. An empty query matches every user, which
/// is what incremental search boxes expect while the field is blank.
///
/// [`Directory::search_user`]: super::Directory::search_user
#[derive(Clone, Debug, Default)]
pub struct SearchCriteria {
    query: String,
}

impl SearchCriteria {
    /// Create criteria from a free-text query.
    pub fn query(text: impl Into<String>) -> Self {
        Self { query: text.into() }
    }

    /// Check whether a user matches these criteria.
    pub fn matches(&self, user: &PublicUser) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        user.username.to_lowercase().contains(&needle)
            || user.name.to_lowercase().contains(&needle)
            || user.email.to_lowercase().contains(&needle)
    }
}
