//! Status kinds
//!
//! Positive status means a file was selected, negative status names one of
//! the fixed failure kinds below, zero carries no meaning.

use thiserror::Error;

use crate::message::ResultMessage;

pub const FILE_SELECTED_STATUS: i32 = 1;
pub const FILE_SELECTED_TEXT: &str = "file selected";

/// Every way a picker session can fail
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerError {
    /// Host lacks cross-origin messaging
    #[error("not supported")]
    NotSupported,
    /// Session requested before initialization
    #[error("not initialized")]
    NotInitialized,
    /// Initialization lacked the required domain
    #[error("missing domain")]
    MissingDomain,
    /// Window-open call returned no handle
    #[error("popup blocked")]
    PopupBlocked,
    /// Popup closed by the user, or closed explicitly
    #[error("popup closed")]
    PopupClosed,
    /// Preempted by a newer session
    #[error("popup reopened")]
    PopupReopened,
}

impl PickerError {
    pub const ALL: [PickerError; 6] = [
        PickerError::NotSupported,
        PickerError::NotInitialized,
        PickerError::MissingDomain,
        PickerError::PopupBlocked,
        PickerError::PopupClosed,
        PickerError::PopupReopened,
    ];

    pub fn status(&self) -> i32 {
        match self {
            PickerError::NotSupported => -1,
            PickerError::NotInitialized => -2,
            PickerError::MissingDomain => -3,
            PickerError::PopupBlocked => -4,
            PickerError::PopupClosed => -5,
            PickerError::PopupReopened => -6,
        }
    }

    pub fn status_text(&self) -> &'static str {
        match self {
            PickerError::NotSupported => "not supported",
            PickerError::NotInitialized => "not initialized",
            PickerError::MissingDomain => "missing domain",
            PickerError::PopupBlocked => "popup blocked",
            PickerError::PopupClosed => "popup closed",
            PickerError::PopupReopened => "popup reopened",
        }
    }

    pub fn from_status(status: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.status() == status)
    }

    pub fn to_message(&self) -> ResultMessage {
        ResultMessage::new(self.status(), self.status_text())
    }
}

impl From<PickerError> for ResultMessage {
    fn from(error: PickerError) -> Self {
        error.to_message()
    }
}
