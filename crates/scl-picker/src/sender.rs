//! Popup side: delivering the user's selection back to the host page

use serde_json::Value;
use std::sync::Arc;

use scl_protocol::{InboundPayload, ResultMessage};

use crate::bus::{MessageBus, MessageEvent};
use crate::host::MessagingMode;
use crate::relay::RelayFrame;

/// The window that opened the popup, as reachable from the popup
pub trait Opener: Send + Sync {
    fn post_message(&self, message: &ResultMessage, target_origin: &str);

    /// Relay frame mounted in the opener under `frame_id`, if still present
    fn relay_frame(&self, frame_id: &str) -> Option<Arc<dyn RelayFrame>>;
}

/// The popup's own environment
pub trait PopupContext {
    fn opener(&self) -> Option<Arc<dyn Opener>>;
    fn messaging_mode(&self) -> MessagingMode;
    fn close_window(&self);
}

/// Deliver `data` as a `file selected` result and close the popup.
///
/// Called once, by the picker page, when the user completes a pick.
/// Returns false and does nothing if neither the opener nor (in relay mode)
/// its relay frame can be reached. `target_origin` defaults to `"*"`.
pub fn send_selection(
    context: &dyn PopupContext,
    relay_frame_id: &str,
    data: Value,
    target_origin: Option<&str>,
) -> bool {
    let Some(opener) = context.opener() else {
        tracing::debug!("No opener to deliver the selection to");
        return false;
    };

    let message = ResultMessage::file_selected(data);
    let target_origin = target_origin.unwrap_or("*");

    match context.messaging_mode() {
        MessagingMode::Direct => opener.post_message(&message, target_origin),
        MessagingMode::Relay => {
            let Some(relay) = opener.relay_frame(relay_frame_id) else {
                tracing::warn!(frame_id = %relay_frame_id, "Relay frame is gone");
                return false;
            };
            let payload = match message.to_json_text() {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize selection");
                    return false;
                }
            };
            relay.proxy_to_parent(&payload, target_origin);
        }
        MessagingMode::Unsupported => {
            tracing::warn!("Popup cannot message its opener");
            return false;
        }
    }

    context.close_window();
    true
}

/// In-process opener: posts into the host page's [`MessageBus`]
#[derive(Clone)]
pub struct BusOpener {
    bus: MessageBus,
    /// Origin of the opener page; posts targeting anything else are dropped
    page_origin: String,
    /// Origin stamped on delivered events (the popup's origin)
    sender_origin: String,
    relay: Option<(String, Arc<dyn RelayFrame>)>,
}

impl BusOpener {
    pub fn new(
        bus: MessageBus,
        page_origin: impl Into<String>,
        sender_origin: impl Into<String>,
    ) -> Self {
        Self {
            bus,
            page_origin: page_origin.into(),
            sender_origin: sender_origin.into(),
            relay: None,
        }
    }

    pub fn with_relay_frame(
        mut self,
        frame_id: impl Into<String>,
        frame: Arc<dyn RelayFrame>,
    ) -> Self {
        self.relay = Some((frame_id.into(), frame));
        self
    }
}

impl Opener for BusOpener {
    fn post_message(&self, message: &ResultMessage, target_origin: &str) {
        if target_origin != "*" && target_origin != self.page_origin {
            tracing::debug!(
                target_origin = %target_origin,
                page_origin = %self.page_origin,
                "Dropping post for another origin"
            );
            return;
        }
        self.bus.dispatch(&MessageEvent::new(
            self.sender_origin.clone(),
            InboundPayload::from(message),
        ));
    }

    fn relay_frame(&self, frame_id: &str) -> Option<Arc<dyn RelayFrame>> {
        self.relay
            .as_ref()
            .filter(|(id, _)| id == frame_id)
            .map(|(_, frame)| Arc::clone(frame))
    }
}
