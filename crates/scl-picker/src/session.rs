//! Popup session record and lifecycle phases
//!
//! ```text
//! Idle
//!   ↓ open
//! Opening ──(blocked)──► Idle
//!   ↓ window opened
//! Watching
//!   ↓ settled (message, poll, close, reopen)
//! Idle
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use scl_deferred::Deferred;
use scl_protocol::ResultMessage;

use crate::host::PopupWindow;
use crate::scheduler::TimerHandle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No popup; ready for a new session
    #[default]
    Idle,
    /// Building the address and asking the host for a window
    Opening,
    /// Popup open, liveness poll running
    Watching,
}

impl SessionPhase {
    pub fn can_transition_to(&self, target: SessionPhase) -> bool {
        match (self, target) {
            (SessionPhase::Idle, SessionPhase::Opening) => true,
            (SessionPhase::Opening, SessionPhase::Watching) => true,
            // Popup blocked
            (SessionPhase::Opening, SessionPhase::Idle) => true,
            (SessionPhase::Watching, SessionPhase::Idle) => true,
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Opening => "opening",
            SessionPhase::Watching => "watching",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The single live popup.
///
/// `deferred` is the popup-level result: it is rejected by the liveness
/// poll, by preemption and by an explicit close, and its failure forwards
/// into the session promise handed to the caller.
pub(crate) struct PopupSession {
    pub id: String,
    pub origin: String,
    pub opened_at: DateTime<Utc>,
    pub window: Arc<dyn PopupWindow>,
    pub timer: Option<TimerHandle>,
    pub deferred: Deferred<(), ResultMessage>,
}

impl PopupSession {
    pub fn new(
        id: String,
        origin: String,
        window: Arc<dyn PopupWindow>,
        deferred: Deferred<(), ResultMessage>,
    ) -> Self {
        Self {
            id,
            origin,
            opened_at: Utc::now(),
            window,
            timer: None,
            deferred,
        }
    }

    pub fn next_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn cancel_watch(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id.clone(),
            origin: self.origin.clone(),
            opened_at: self.opened_at,
            window_closed: self.window.is_closed(),
        }
    }
}

/// Snapshot of the live session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: String,
    pub origin: String,
    pub opened_at: DateTime<Utc>,
    pub window_closed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(SessionPhase::Idle.can_transition_to(SessionPhase::Opening));
        assert!(SessionPhase::Opening.can_transition_to(SessionPhase::Watching));
        assert!(SessionPhase::Opening.can_transition_to(SessionPhase::Idle));
        assert!(SessionPhase::Watching.can_transition_to(SessionPhase::Idle));
    }

    #[test]
    fn test_invalid_transitions() {
        // A new session always passes through Idle first
        assert!(!SessionPhase::Watching.can_transition_to(SessionPhase::Opening));
        assert!(!SessionPhase::Idle.can_transition_to(SessionPhase::Watching));
    }
}
