//! Constants used throughout the Amity library.
//!
//! This module provides central definitions for the reserved storage keys
//! the components persist their state under. The key names match the
//! layout the hosting application's store has always used.

/// Storage key for the username-to-user mapping.
pub const USERS_KEY: &str = "Users:users";

/// Storage key for the persisted session pointer. Absent when logged out.
pub const CURRENT_USER_KEY: &str = "Auth:currentUser";

/// Storage key for the id-to-post mapping.
pub const POSTS_KEY: &str = "Feed:posts";
