//! Cross-origin message channel of the host page
//!
//! The host feeds every inbound `message` event into [`MessageBus::dispatch`].
//! Listeners are explicit subscriptions so a session can remove its own
//! listener the moment it settles.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use scl_protocol::InboundPayload;

#[derive(Debug, Clone, PartialEq)]
pub struct MessageEvent {
    /// Origin advertised by the sender
    pub origin: String,
    pub payload: InboundPayload,
}

impl MessageEvent {
    pub fn new(origin: impl Into<String>, payload: impl Into<InboundPayload>) -> Self {
        Self {
            origin: origin.into(),
            payload: payload.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type MessageHandler = Arc<dyn Fn(&MessageEvent) + Send + Sync>;

#[derive(Clone, Default)]
pub struct MessageBus {
    listeners: Arc<RwLock<Vec<(ListenerId, MessageHandler)>>>,
    next_id: Arc<AtomicU64>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: MessageHandler) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.listeners.write().push((id, handler));
        tracing::trace!(listener = id.0, "Subscribed message listener");
        id
    }

    /// Returns false if the listener was not registered
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let removed = {
            let mut listeners = self.listeners.write();
            listeners
                .iter()
                .position(|(existing, _)| *existing == id)
                .map(|index| listeners.remove(index))
        };
        // handler dropped outside the lock
        removed.is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Deliver `event` to every listener; returns how many saw it.
    ///
    /// A listener removed by an earlier listener during the same dispatch
    /// is skipped.
    pub fn dispatch(&self, event: &MessageEvent) -> usize {
        let snapshot: Vec<(ListenerId, MessageHandler)> = self.listeners.read().clone();
        let mut delivered = 0;

        for (id, handler) in snapshot {
            let still_registered = self
                .listeners
                .read()
                .iter()
                .any(|(existing, _)| *existing == id);
            if !still_registered {
                continue;
            }
            handler(event);
            delivered += 1;
        }

        delivered
    }
}

impl std::fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
