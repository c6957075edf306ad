//! In-process doubles for driving a picker without a browser
//!
//! Paired with [`ManualScheduler`](crate::ManualScheduler) these make every
//! session scenario reproducible: open, block, close, reply, reopen.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

use crate::host::{MessagingMode, PickerHost, PopupWindow};
use crate::sender::{Opener, PopupContext};

#[derive(Debug, Default)]
pub struct StubWindow {
    closed: AtomicBool,
}

impl StubWindow {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PopupWindow for StubWindow {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
pub struct OpenedWindow {
    pub address: Url,
    pub name: String,
    pub features: String,
    pub window: Arc<StubWindow>,
}

/// Host page double recording every window and relay frame it is asked for
pub struct StubHost {
    caller_origin: String,
    mode: Mutex<MessagingMode>,
    blocking: AtomicBool,
    opened: Mutex<Vec<OpenedWindow>>,
    relays: Mutex<Vec<(String, Url)>>,
}

impl StubHost {
    pub fn new(caller_origin: impl Into<String>) -> Self {
        Self {
            caller_origin: caller_origin.into(),
            mode: Mutex::new(MessagingMode::Direct),
            blocking: AtomicBool::new(false),
            opened: Mutex::new(Vec::new()),
            relays: Mutex::new(Vec::new()),
        }
    }

    pub fn with_mode(self, mode: MessagingMode) -> Self {
        *self.mode.lock() = mode;
        self
    }

    /// Make subsequent window-open calls fail as if a popup blocker intervened
    pub fn set_blocking(&self, blocking: bool) {
        self.blocking.store(blocking, Ordering::SeqCst);
    }

    pub fn opened(&self) -> Vec<OpenedWindow> {
        self.opened.lock().clone()
    }

    pub fn last_window(&self) -> Option<Arc<StubWindow>> {
        self.opened.lock().last().map(|w| Arc::clone(&w.window))
    }

    /// Relay frames currently mounted, in mount order
    pub fn relay_frames(&self) -> Vec<(String, Url)> {
        self.relays.lock().clone()
    }
}

impl PickerHost for StubHost {
    fn messaging_mode(&self) -> MessagingMode {
        *self.mode.lock()
    }

    fn caller_origin(&self) -> String {
        self.caller_origin.clone()
    }

    fn open_window(
        &self,
        address: &Url,
        name: &str,
        features: &str,
    ) -> Option<Arc<dyn PopupWindow>> {
        if self.blocking.load(Ordering::SeqCst) {
            return None;
        }
        let window = Arc::new(StubWindow::new());
        self.opened.lock().push(OpenedWindow {
            address: address.clone(),
            name: name.to_string(),
            features: features.to_string(),
            window: Arc::clone(&window),
        });
        Some(window)
    }

    fn mount_relay_frame(&self, frame_id: &str, address: &Url) {
        self.relays
            .lock()
            .push((frame_id.to_string(), address.clone()));
    }

    fn unmount_relay_frame(&self, frame_id: &str) {
        self.relays.lock().retain(|(id, _)| id != frame_id);
    }
}

/// Popup-side double for [`send_selection`](crate::send_selection)
pub struct StubPopup {
    opener: Option<Arc<dyn Opener>>,
    mode: MessagingMode,
    closed: AtomicBool,
}

impl StubPopup {
    pub fn new(opener: Option<Arc<dyn Opener>>, mode: MessagingMode) -> Self {
        Self {
            opener,
            mode,
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl PopupContext for StubPopup {
    fn opener(&self) -> Option<Arc<dyn Opener>> {
        self.opener.clone()
    }

    fn messaging_mode(&self) -> MessagingMode {
        self.mode
    }

    fn close_window(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
