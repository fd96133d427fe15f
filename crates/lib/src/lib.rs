//!
//! Amity: the state layer of a small social network.
//!
//! This library implements registration/login, a friends list, and a post
//! feed on top of a pluggable string-keyed storage adapter. It is the "API
//! module" a hosting UI embeds; the UI itself (views, routing tables, DOM
//! glue) lives outside this crate.
//!
//! ## Core Concepts
//!
//! * **Adapter (`storage::Adapter`)**: a pluggable key-value store holding
//!   JSON-serialized values under string keys. `storage::InMemory` is the
//!   bundled implementation, with whole-state file snapshots for demos.
//! * **Directory (`directory::Directory`)**: the authoritative mapping of
//!   username to user record. All user mutations persist through it.
//! * **Session (`session::SessionManager`)**: at most one authenticated
//!   user per [`Api`]; restored from the adapter at startup.
//! * **Graph (`graph::SocialGraph`)**: friend-list operations layered on
//!   the directory and the session.
//! * **Feed (`feed::Feed`)**: post creation and aggregation of the session
//!   user's and their friends' posts.
//! * **Events (`events::Subscriber`)**: synchronous in-process
//!   notifications for login, logout, user updates, and new posts. Late
//!   subscribers do not receive past events.
//!
//! All operations are `async fn` to match the deferred-result convention
//! of the hosting frameworks this library targets; the work itself is
//! synchronous against the in-memory state.

pub mod api;
pub mod clock;
pub mod constants;
pub mod directory;
pub mod events;
pub mod feed;
pub mod graph;
pub mod session;
pub mod storage;

pub use api::Api;
#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use clock::{Clock, SystemClock};

/// Result type used throughout the Amity library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Amity library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured storage errors from the storage module
    #[error(transparent)]
    Storage(storage::StorageError),

    /// Structured user directory errors from the directory module
    #[error(transparent)]
    Directory(directory::DirectoryError),

    /// Structured session errors from the session module
    #[error(transparent)]
    Session(session::SessionError),

    /// Structured social graph errors from the graph module
    #[error(transparent)]
    Graph(graph::GraphError),

    /// Structured feed errors from the feed module
    #[error(transparent)]
    Feed(feed::FeedError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Storage(_) => "storage",
            Error::Directory(_) => "directory",
            Error::Session(_) => "session",
            Error::Graph(_) => "graph",
            Error::Feed(_) => "feed",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Directory(directory_err) => directory_err.is_not_found(),
            Error::Session(session_err) => session_err.is_invalid_username(),
            Error::Graph(graph_err) => graph_err.is_not_found(),
            Error::Feed(feed_err) => feed_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Directory(directory_err) => directory_err.is_conflict(),
            Error::Session(session_err) => session_err.is_conflict(),
            _ => false,
        }
    }

    /// Check if this error is authentication-related.
    pub fn is_authentication_error(&self) -> bool {
        match self {
            Error::Session(session_err) => session_err.is_authentication_error(),
            _ => false,
        }
    }

    /// Check if this error indicates that an operation needed a session
    /// user and none was present.
    pub fn is_no_session_error(&self) -> bool {
        match self {
            Error::Session(session_err) => session_err.is_no_session_error(),
            Error::Graph(graph_err) => graph_err.is_no_session_error(),
            Error::Feed(feed_err) => feed_err.is_no_session_error(),
            _ => false,
        }
    }

    /// Check if this error is storage-related.
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Storage(storage_err) => storage_err.is_io_error(),
            _ => false,
        }
    }
}
