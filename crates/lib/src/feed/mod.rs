//! Post feed for Amity
//!
//! Posts are append-only records keyed by generation-ordered ids derived
//! from the clock. The feed aggregates the session user's posts with
//! those of their friends; there is no edit or delete.

pub mod errors;

use std::{collections::HashSet, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    api::Internal,
    directory::{Directory, User},
    events::Event,
    graph::SocialGraph,
};

pub use errors::FeedError;

/// A single post.
///
/// Serde field names match the persisted layout of the store this library
/// descends from: the author is stored under `user`, the body under
/// `post`, and the creation timestamp under `date`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique post id, `p` followed by the creation milliseconds
    pub id: String,

    /// Username of the author
    #[serde(rename = "user")]
    pub author: String,

    /// Body text
    #[serde(rename = "post")]
    pub body: String,

    /// Creation time as milliseconds since Unix epoch. Matches the
    /// milliseconds embedded in the id.
    #[serde(rename = "date")]
    pub created_at: u64,
}

impl Post {
    /// Creation time as a UTC datetime.
    pub fn created_at_utc(&self) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::from_timestamp_millis(self.created_at as i64).unwrap_or_default()
    }
}

/// Post creation and feed aggregation.
///
/// `Feed` is a lightweight handle; get one from
/// [`Api::feed`](crate::Api::feed).
pub struct Feed {
    internal: Arc<Internal>,
}

impl Feed {
    pub(crate) fn new(internal: Arc<Internal>) -> Self {
        Self { internal }
    }

    fn directory(&self) -> Directory {
        Directory::new(self.internal.clone())
    }

    fn graph(&self) -> SocialGraph {
        SocialGraph::new(self.internal.clone())
    }

    fn session_user(&self) -> Result<User> {
        self.internal
            .session
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| FeedError::NoUserInSession.into())
    }

    /// Create a post authored by the session user.
    ///
    /// Fails with [`FeedError::NoUserInSession`] when no user is
    /// authenticated. The id is `p` followed by the current milliseconds;
    /// when two posts land in the same millisecond the later one bumps
    /// its milliseconds until the id is free, so ids stay unique and the
    /// timestamp stays consistent with the id. On success the post is
    /// persisted, a [`Event::NewPost`] notification is emitted, and a
    /// copy of the stored post is returned.
    pub async fn post(&self, body: &str) -> Result<Post> {
        let author = self.session_user()?;

        let post = {
            let mut posts = self.internal.posts.write().unwrap();
            let mut millis = self.internal.clock.now_millis();
            while posts.contains_key(&format!("p{millis}")) {
                millis += 1;
            }
            let post = Post {
                id: format!("p{millis}"),
                author: author.username,
                body: body.to_string(),
                created_at: millis,
            };
            posts.insert(post.id.clone(), post.clone());
            post
        };
        self.internal.persist_posts().await?;

        self.internal.emit(&Event::NewPost(post.clone()));
        tracing::debug!(id = %post.id, author = %post.author, "post created");
        Ok(post)
    }

    /// Get a copy of a post by id.
    ///
    /// Fails with [`FeedError::PostNotFound`] if absent.
    pub async fn get_post(&self, id: &str) -> Result<Post> {
        let posts = self.internal.posts.read().unwrap();
        posts
            .get(id)
            .cloned()
            .ok_or_else(|| FeedError::PostNotFound { id: id.to_string() }.into())
    }

    /// Get every post by one author, oldest first.
    ///
    /// With `Some(username)` the author must resolve in the directory;
    /// lookup failures pass through unchanged. With `None` the session
    /// user is the author, failing with [`FeedError::NoUserInSession`]
    /// when no user is authenticated. An author with no posts yields an
    /// empty vec.
    pub async fn user_posts(&self, username: Option<&str>) -> Result<Vec<Post>> {
        let author = match username {
            Some(username) => self.directory().get_user(username).await?.username,
            None => self.session_user()?.username,
        };
        Ok(self.posts_by(&author))
    }

    /// Get the session user's feed: their own posts followed by each
    /// friend's posts, in first-occurrence friends-list order, each
    /// group oldest first. A friend listed more than once contributes
    /// their posts once.
    ///
    /// Fails with [`FeedError::NoUserInSession`] when no user is
    /// authenticated, and with a not-found error when a friend no longer
    /// resolves in the directory.
    pub async fn feed(&self) -> Result<Vec<Post>> {
        let current = self.session_user()?;

        // Resolves every friend, so a dangling friends-list entry fails
        // here rather than producing a silently incomplete feed.
        let friends = self.graph().friends_of(&current.username).await?;

        let mut feed = self.posts_by(&current.username);
        let mut seen = HashSet::new();
        for friend_username in &current.friends {
            if !seen.insert(friend_username.as_str()) {
                continue;
            }
            if let Some(friend) = friends.get(friend_username) {
                feed.extend(self.posts_by(&friend.username));
            }
        }
        Ok(feed)
    }

    /// All posts by one author, oldest first.
    fn posts_by(&self, author: &str) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .internal
            .posts
            .read()
            .unwrap()
            .values()
            .filter(|post| post.author == author)
            .cloned()
            .collect();
        posts.sort_by_key(|post| post.created_at);
        posts
    }
}
