//! Document-scoped listener registry.
//!
//! Every listener the module installs (handle presses, document move and
//! release, viewport resize) is recorded here behind an explicit
//! [`SubscriptionId`]. Hosts forward every surface event; the module only
//! reacts to topics that currently have a subscription.

use crate::handles::Corner;
use std::collections::BTreeMap;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// What a listener is subscribed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Press (mouse-down or touch-start) on one handle.
    HandlePress(Corner),
    /// Pointer movement anywhere in the document.
    PointerMove,
    /// Pointer release anywhere in the document.
    PointerRelease,
    /// Viewport size changes.
    ViewportResize,
}

/// Registry of active listeners.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    next_id: u64,
    subscriptions: BTreeMap<SubscriptionId, Topic>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `topic`.
    pub fn subscribe(&mut self, topic: Topic) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.insert(id, topic);
        id
    }

    /// Remove a listener. Returns false if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(&id).is_some()
    }

    /// Check if any listener is registered for `topic`.
    pub fn is_subscribed(&self, topic: Topic) -> bool {
        self.subscriptions.values().any(|t| *t == topic)
    }

    /// Number of listeners registered for `topic`.
    pub fn count(&self, topic: Topic) -> usize {
        self.subscriptions.values().filter(|t| **t == topic).count()
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
