//! Change notification with queueing and deduplication.
//!
//! [`ChangeNotifier`] sits between the router and its single subscriber:
//!
//! - while no subscriber is installed, every notification is queued;
//! - installing one flushes the queue in arrival order;
//! - a notification equal (by value) to the last one delivered is dropped.
//!
//! The subscriber also receives the [`RouteDefinition`] registered for the
//! entry's id, or `None` when the entry has no id or no route.

use crate::entry::RouteEntry;
use crate::route::{RouteDefinition, RouteRegistry};
use crate::{debug_log, trace_log};
use std::collections::VecDeque;
use std::fmt;

/// Subscriber callback type.
pub type Subscriber<S, P> = Box<dyn FnMut(&RouteEntry, Option<&RouteDefinition<S, P>>) + Send>;

/// Holds the subscriber, the pending queue and the last delivered entry.
pub struct ChangeNotifier<S, P = ()> {
    subscriber: Option<Subscriber<S, P>>,
    pending: VecDeque<RouteEntry>,
    last_notified: Option<RouteEntry>,
}

impl<S: 'static, P> ChangeNotifier<S, P> {
    /// Create a notifier with no subscriber.
    pub fn new() -> Self {
        Self {
            subscriber: None,
            pending: VecDeque::new(),
            last_notified: None,
        }
    }

    /// Install `subscriber`, replacing any previous one, and flush the queue.
    pub fn set_subscriber(
        &mut self,
        subscriber: Subscriber<S, P>,
        routes: &RouteRegistry<S, P>,
    ) {
        self.subscriber = Some(subscriber);
        debug_log!("Subscriber installed; flushing {} pending", self.pending.len());
        while let Some(entry) = self.pending.pop_front() {
            self.deliver(entry, routes);
        }
    }

    /// Remove the subscriber. Later notifications are queued again.
    pub fn take_subscriber(&mut self) -> Option<Subscriber<S, P>> {
        self.subscriber.take()
    }

    /// Return `true` if a subscriber is installed.
    pub fn has_subscriber(&self) -> bool {
        self.subscriber.is_some()
    }

    /// Report that `entry` is now the visible entry.
    pub fn notify(&mut self, entry: RouteEntry, routes: &RouteRegistry<S, P>) {
        if self.subscriber.is_none() {
            trace_log!("No subscriber; queued '{}'", entry);
            self.pending.push_back(entry);
            return;
        }
        self.deliver(entry, routes);
    }

    fn deliver(&mut self, entry: RouteEntry, routes: &RouteRegistry<S, P>) {
        let Some(subscriber) = self.subscriber.as_mut() else {
            self.pending.push_back(entry);
            return;
        };
        if self.last_notified.as_ref() == Some(&entry) {
            trace_log!("Suppressed duplicate notification for '{}'", entry);
            return;
        }
        debug_log!("Notifying subscriber: '{}'", entry);
        let route = entry.id().and_then(|id| routes.get(id));
        subscriber(&entry, route);
        self.last_notified = Some(entry);
    }

    /// Entries waiting for a subscriber, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &RouteEntry> {
        self.pending.iter()
    }

    /// Number of queued notifications.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// The last entry handed to a subscriber.
    pub fn last_notified(&self) -> Option<&RouteEntry> {
        self.last_notified.as_ref()
    }
}

impl<S: 'static, P> Default for ChangeNotifier<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static, P> fmt::Debug for ChangeNotifier<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("has_subscriber", &self.subscriber.is_some())
            .field("pending", &self.pending)
            .field("last_notified", &self.last_notified)
            .finish()
    }
}
