//!
//! Provides the [`Api`] facade that wires the components together.
//!
//! `Api` owns the storage adapter, the clock, the subscriber set, and the
//! restored in-memory state, and hands out lightweight component handles
//! (`Directory`, `SessionManager`, `SocialGraph`, `Feed`). It is the
//! explicit per-process context object that replaces the global singleton
//! services of the system this library descends from: construction
//! restores persisted state, dropping the last handle tears it down.

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, RwLock},
};

use crate::{
    Clock, Result, SystemClock,
    constants::{CURRENT_USER_KEY, POSTS_KEY, USERS_KEY},
    directory::{Directory, User},
    events::{Event, Subscriber, SubscriberSet},
    feed::{Feed, Post},
    graph::SocialGraph,
    session::SessionManager,
    storage::{self, Adapter},
};

/// Internal state for Api
///
/// This structure holds the actual implementation data. `Api` itself is
/// just a cheap-to-clone handle wrapping `Arc<Internal>`.
pub(crate) struct Internal {
    /// The storage adapter all state persists through
    pub(crate) adapter: Arc<dyn Adapter>,
    /// Time provider for post timestamps
    pub(crate) clock: Arc<dyn Clock>,
    /// Registered event subscribers
    pub(crate) subscribers: RwLock<SubscriberSet>,
    /// The username-to-user mapping, restored from the adapter
    pub(crate) users: RwLock<HashMap<String, User>>,
    /// The session user, if any
    pub(crate) session: RwLock<Option<User>>,
    /// The id-to-post mapping. Reads that need creation order sort by
    /// `created_at`; the key order is not meaningful.
    pub(crate) posts: RwLock<BTreeMap<String, Post>>,
}

impl std::fmt::Debug for Internal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Internal")
            .field("adapter", &"<Adapter>")
            .field("clock", &self.clock)
            .field(
                "subscribers",
                &format!("<{} subscribers>", self.subscribers.read().unwrap().len()),
            )
            .field("users", &self.users.read().unwrap().len())
            .field(
                "session",
                &self
                    .session
                    .read()
                    .unwrap()
                    .as_ref()
                    .map(|u| u.username.clone()),
            )
            .field("posts", &self.posts.read().unwrap().len())
            .finish()
    }
}

impl Internal {
    /// Deliver an event to every registered subscriber.
    pub(crate) fn emit(&self, event: &Event) {
        self.subscribers.read().unwrap().emit(event);
    }

    /// Persist the full user mapping under its fixed key.
    pub(crate) async fn persist_users(&self) -> Result<()> {
        let snapshot = self.users.read().unwrap().clone();
        storage::set_json(self.adapter.as_ref(), USERS_KEY, &snapshot).await
    }

    /// Persist or clear the session pointer.
    pub(crate) async fn persist_session(&self) -> Result<()> {
        let snapshot = self.session.read().unwrap().clone();
        match snapshot {
            Some(user) => storage::set_json(self.adapter.as_ref(), CURRENT_USER_KEY, &user).await,
            None => self.adapter.remove(CURRENT_USER_KEY).await,
        }
    }

    /// Persist the full post mapping under its fixed key.
    pub(crate) async fn persist_posts(&self) -> Result<()> {
        let snapshot = self.posts.read().unwrap().clone();
        storage::set_json(self.adapter.as_ref(), POSTS_KEY, &snapshot).await
    }
}

/// The Amity API facade.
///
/// `Api` is a cheap-to-clone handle around shared internal state. Open one
/// per process (or per logical user context) over a storage adapter; the
/// persisted users, session pointer, and posts are restored during open.
///
/// ## Example
///
/// ```
/// # use std::sync::Arc;
/// # use amity::{Api, storage::InMemory};
/// # #[tokio::main]
/// # async fn main() -> amity::Result<()> {
/// let api = Api::open(Arc::new(InMemory::new())).await?;
///
/// api.session()
///     .register("alice", "pw1", "Alice", "a@x.com")
///     .await?;
/// api.session().login("alice", "pw1").await?;
/// let post = api.feed().post("hello").await?;
/// assert_eq!(post.author, "alice");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Api {
    inner: Arc<Internal>,
}

impl Api {
    /// Open an Api over a storage adapter, restoring persisted state.
    ///
    /// The username-to-user mapping, the session pointer, and the post
    /// mapping are read from the adapter. A session pointer whose user no
    /// longer resolves in the directory is discarded (and removed from
    /// the adapter), leaving the session in the guest state.
    pub async fn open(adapter: Arc<dyn Adapter>) -> Result<Self> {
        Self::open_impl(adapter, Arc::new(SystemClock)).await
    }

    /// Open an Api with a custom clock.
    ///
    /// This is the same as [`Api::open`] but allows injecting a
    /// controllable clock for post timestamps in tests. Only available
    /// with the `testing` feature or in test builds.
    #[cfg(any(test, feature = "testing"))]
    pub async fn open_with_clock(adapter: Arc<dyn Adapter>, clock: Arc<dyn Clock>) -> Result<Self> {
        Self::open_impl(adapter, clock).await
    }

    /// Internal implementation of open that works with any clock.
    async fn open_impl(adapter: Arc<dyn Adapter>, clock: Arc<dyn Clock>) -> Result<Self> {
        let users: HashMap<String, User> = storage::get_json(adapter.as_ref(), USERS_KEY)
            .await?
            .unwrap_or_default();
        let posts: BTreeMap<String, Post> = storage::get_json(adapter.as_ref(), POSTS_KEY)
            .await?
            .unwrap_or_default();

        // Restore the session only when its user still resolves in the
        // directory. A stale pointer is removed rather than kept around.
        let mut session: Option<User> =
            storage::get_json(adapter.as_ref(), CURRENT_USER_KEY).await?;
        if let Some(restored) = &session {
            match users.get(&restored.username) {
                Some(current) => {
                    tracing::debug!(username = %restored.username, "restored session");
                    session = Some(current.clone());
                }
                None => {
                    tracing::warn!(
                        username = %restored.username,
                        "discarding session pointer for unknown user"
                    );
                    adapter.remove(CURRENT_USER_KEY).await?;
                    session = None;
                }
            }
        }

        let inner = Arc::new(Internal {
            adapter,
            clock,
            subscribers: RwLock::new(SubscriberSet::new()),
            users: RwLock::new(users),
            session: RwLock::new(session),
            posts: RwLock::new(posts),
        });
        Ok(Self { inner })
    }

    /// Get the user directory component.
    pub fn directory(&self) -> Directory {
        Directory::new(self.inner.clone())
    }

    /// Get the session manager component.
    pub fn session(&self) -> SessionManager {
        SessionManager::new(self.inner.clone())
    }

    /// Get the social graph component.
    pub fn graph(&self) -> SocialGraph {
        SocialGraph::new(self.inner.clone())
    }

    /// Get the feed component.
    pub fn feed(&self) -> Feed {
        Feed::new(self.inner.clone())
    }

    /// Register a subscriber for events emitted from now on.
    ///
    /// Past events are not replayed.
    pub fn subscribe(&self, subscriber: Arc<dyn Subscriber>) {
        self.inner.subscribers.write().unwrap().add(subscriber);
    }

    /// Get the storage adapter this Api persists through.
    pub fn adapter(&self) -> Arc<dyn Adapter> {
        self.inner.adapter.clone()
    }

    /// Clear the adapter and all in-memory state.
    pub async fn reset(&self) -> Result<()> {
        self.inner.adapter.reset().await?;
        self.inner.users.write().unwrap().clear();
        *self.inner.session.write().unwrap() = None;
        self.inner.posts.write().unwrap().clear();
        tracing::debug!("api state reset");
        Ok(())
    }
}
