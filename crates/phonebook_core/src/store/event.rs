//! Typed store events and explicit subscription registry.
//!
//! # Invariants
//! - Listeners run in subscription order, synchronously, inside the store
//!   operation that emitted the event.
//! - Listeners never receive the store itself, so dispatch cannot re-enter it.
//! - An unsubscribed listener is dropped immediately and never called again.
//! - A listener returning `ControlFlow::Break` is dropped right after that
//!   call, as if it had been unsubscribed.

use crate::model::contact::{Contact, ContactId};
use std::ops::ControlFlow;

/// Change notification emitted by the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The collection was replaced by a load; `Added` events follow.
    Reset,
    Added(Contact),
    Changed(Contact),
    Removed(Contact),
}

impl StoreEvent {
    /// Contact the event is about, if any.
    pub fn contact_id(&self) -> Option<ContactId> {
        match self {
            Self::Reset => None,
            Self::Added(contact) | Self::Changed(contact) | Self::Removed(contact) => contact.id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Added(_) => "added",
            Self::Changed(_) => "changed",
            Self::Removed(_) => "removed",
        }
    }
}

/// Filter deciding which events a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// Every event, including `Reset`.
    All,
    /// Only events about one contact.
    Contact(ContactId),
}

impl Topic {
    pub fn matches(&self, event: &StoreEvent) -> bool {
        match self {
            Self::All => true,
            Self::Contact(id) => event.contact_id() == Some(*id),
        }
    }
}

/// Handle returned by `subscribe`; pass it back to `unsubscribe` on teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Event callback; `Break` releases the subscription.
pub type Listener = Box<dyn FnMut(&StoreEvent) -> ControlFlow<()>>;

struct Subscriber {
    id: SubscriptionId,
    topic: Topic,
    listener: Listener,
}

/// Subscription registry and dispatcher.
#[derive(Default)]
pub struct EventHub {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, topic: Topic, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push(Subscriber {
            id,
            topic,
            listener,
        });
        id
    }

    /// Removes a listener. Returns `false` when the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|subscriber| subscriber.id != id);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, event: &StoreEvent) {
        self.subscribers.retain_mut(|subscriber| {
            !subscriber.topic.matches(event) || (subscriber.listener)(event).is_continue()
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("next_id", &self.next_id)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
