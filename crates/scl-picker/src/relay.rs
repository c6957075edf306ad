//! Relay frame shim for hosts without direct cross-origin messaging
//!
//! A hidden frame served from the picker's own domain lives inside the host
//! page. The popup hands its result to that frame, and the frame forwards it
//! inward as a text message.

use url::Url;

use crate::bus::{MessageBus, MessageEvent};
use crate::scheduler::TimerHandle;

/// What the popup sees of the relay frame mounted in its opener
pub trait RelayFrame: Send + Sync {
    /// Forward serialized result `payload` to the frame's parent page
    fn proxy_to_parent(&self, payload: &str, target_origin: &str);
}

/// In-process relay frame that forwards into a host page's [`MessageBus`]
#[derive(Debug, Clone)]
pub struct RelayForwarder {
    bus: MessageBus,
    /// Origin the relay frame was loaded from
    relay_origin: String,
    /// Origin of the page the frame is mounted in
    parent_origin: String,
}

impl RelayForwarder {
    pub fn new(
        bus: MessageBus,
        relay_origin: impl Into<String>,
        parent_origin: impl Into<String>,
    ) -> Self {
        Self {
            bus,
            relay_origin: relay_origin.into(),
            parent_origin: parent_origin.into(),
        }
    }
}

impl RelayFrame for RelayForwarder {
    fn proxy_to_parent(&self, payload: &str, target_origin: &str) {
        if target_origin != "*" && target_origin != self.parent_origin {
            tracing::debug!(
                target_origin = %target_origin,
                parent_origin = %self.parent_origin,
                "Relay dropped message for another origin"
            );
            return;
        }
        self.bus
            .dispatch(&MessageEvent::new(self.relay_origin.clone(), payload));
    }
}

/// Relay frame owned by an initialized picker
#[derive(Debug)]
pub(crate) struct MountedRelay {
    pub frame_id: String,
    pub address: Url,
    /// Deferred mount; cancelled if replaced before it ran
    pub mount: TimerHandle,
}
