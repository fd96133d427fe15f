//! In-process notifications for state changes.
//!
//! This module provides the infrastructure for observing login, logout,
//! user-update, and new-post events. Delivery is synchronous and in
//! registration order; subscribers registered after an emission do not
//! receive past events (no buffering or replay).

use std::sync::Arc;

use crate::Result;
use crate::directory::{PublicUser, User};
use crate::feed::Post;

/// A notification emitted by the library after a state change.
#[derive(Debug, Clone)]
pub enum Event {
    /// A user successfully logged in. Carries the password-stripped user.
    LoginSuccess(PublicUser),
    /// The session user logged out.
    LogoutSuccess,
    /// A directory record was updated. Carries the merged record.
    UserUpdated(User),
    /// A new post was created.
    NewPost(Post),
}

/// Trait for observing [`Event`]s emitted by the library.
///
/// Subscribers are called synchronously after the state change has been
/// persisted but before the originating operation returns. A subscriber
/// failure does not roll back the operation and does not stop delivery to
/// the remaining subscribers; failures are logged by the emitter.
pub trait Subscriber: Send + Sync {
    /// Called for every event emitted after this subscriber was registered.
    fn on_event(&self, event: &Event) -> Result<()>;
}

/// A collection of subscribers notified together.
///
/// Subscribers are invoked in the order they were added.
#[derive(Default)]
pub struct SubscriberSet {
    subscribers: Vec<Arc<dyn Subscriber>>,
}

impl SubscriberSet {
    /// Create a new empty subscriber set.
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Add a subscriber to the set.
    pub fn add(&mut self, subscriber: Arc<dyn Subscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Deliver an event to every subscriber in registration order.
    ///
    /// If a subscriber fails, delivery continues with the remaining
    /// subscribers and the failure is logged. Errors never propagate to
    /// the operation that emitted the event.
    pub fn emit(&self, event: &Event) {
        for subscriber in &self.subscribers {
            if let Err(e) = subscriber.on_event(event) {
                tracing::error!("event subscriber failed: {e}");
            }
        }
    }

    /// Check if there are any subscribers registered.
    pub fn has_subscribers(&self) -> bool {
        !self.subscribers.is_empty()
    }

    /// Get the number of registered subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
