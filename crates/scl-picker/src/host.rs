//! Host environment seams
//!
//! The picker never touches a real browser. Whatever embeds it (a wasm
//! shim, a webview shell, a test) implements these traits.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

/// How results can travel from the popup back to the host page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessagingMode {
    /// Popup posts straight to its opener
    Direct,
    /// Popup hands results to a relay frame mounted in the opener
    Relay,
    /// No cross-origin messaging at all
    Unsupported,
}

impl MessagingMode {
    pub fn is_supported(&self) -> bool {
        !matches!(self, MessagingMode::Unsupported)
    }
}

/// A window opened by the host
pub trait PopupWindow: Send + Sync {
    fn is_closed(&self) -> bool;
    fn close(&self);
}

pub trait PickerHost: Send + Sync {
    fn messaging_mode(&self) -> MessagingMode;

    /// `protocol//hostname` of the page hosting the picker
    fn caller_origin(&self) -> String;

    /// Open `address` in a named window. `None` means the popup was blocked.
    fn open_window(&self, address: &Url, name: &str, features: &str)
        -> Option<Arc<dyn PopupWindow>>;

    /// Mount an invisible relay frame. Only called in [`MessagingMode::Relay`].
    fn mount_relay_frame(&self, _frame_id: &str, _address: &Url) {}

    /// Remove a previously mounted relay frame; unknown ids are ignored.
    fn unmount_relay_frame(&self, _frame_id: &str) {}
}
