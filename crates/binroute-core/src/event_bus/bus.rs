//! Per-session notification hub.
//!
//! Handlers run in subscription order on the publishing call. The broadcast
//! side is fed afterwards, so async receivers never observe an event before
//! the synchronous subscribers have.

use parking_lot::RwLock;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{EditEvent, EventCategory};
use crate::constants::EVENT_CHANNEL_CAPACITY;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0.simple())
    }
}

/// Which events a subscriber wants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventFilter {
    #[default]
    All,
    /// Any event whose category is listed.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &EditEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(wanted) => wanted.contains(&event.category()),
        }
    }
}

struct Subscriber {
    id: SubscriptionId,
    filter: EventFilter,
    handler: Box<dyn Fn(&EditEvent) + Send + Sync>,
}

/// Notification hub owned by one session controller.
pub struct EventBus {
    subscribers: RwLock<Vec<Subscriber>>,
    sender: broadcast::Sender<EditEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_CHANNEL_CAPACITY)
    }

    /// `capacity` is how many events a broadcast receiver may fall behind
    /// before it starts seeing `Lagged`.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            subscribers: RwLock::new(Vec::new()),
            sender,
        }
    }

    /// Delivers `event` to every matching handler, then to broadcast
    /// receivers. Returns how many listeners saw it.
    ///
    /// Handlers must not subscribe or unsubscribe on this bus.
    pub fn publish(&self, event: EditEvent) -> usize {
        tracing::debug!("Publishing: {}", event.description());

        let mut handled = 0;
        for sub in self.subscribers.read().iter() {
            if sub.filter.matches(&event) {
                (sub.handler)(&event);
                handled += 1;
            }
        }

        // Err only means nobody holds a receiver.
        let received = self.sender.send(event).unwrap_or(0);
        handled + received
    }

    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&EditEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.subscribers.write().push(Subscriber {
            id,
            filter,
            handler: Box::new(handler),
        });
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|sub| sub.id != id);
        let removed = subscribers.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// A receiver for hosts that poll asynchronously. It only sees events
    /// published after this call.
    pub fn receiver(&self) -> broadcast::Receiver<EditEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("receivers", &self.sender.receiver_count())
            .finish()
    }
}
