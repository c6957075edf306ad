//! Result messages
//!
//! Wire shape, in both directions:
//! ```json
//! { "status": 1, "statusText": "file selected", "data": { "id": 42 } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::status::{PickerError, FILE_SELECTED_STATUS, FILE_SELECTED_TEXT};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMessage {
    /// > 0 success, < 0 failure kind, 0 ignored
    pub status: i32,
    #[serde(default)]
    pub status_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// How a session reacts to a message's status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    Success,
    Failure,
    Ignored,
}

impl ResultMessage {
    pub fn new(status: i32, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            data: None,
        }
    }

    /// The message a picker sends once the user picked something
    pub fn file_selected(data: Value) -> Self {
        Self {
            status: FILE_SELECTED_STATUS,
            status_text: FILE_SELECTED_TEXT.to_string(),
            data: Some(data),
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn outcome(&self) -> MessageOutcome {
        match self.status {
            s if s > 0 => MessageOutcome::Success,
            s if s < 0 => MessageOutcome::Failure,
            _ => MessageOutcome::Ignored,
        }
    }

    /// The fixed failure kind this message carries, if any
    pub fn error_kind(&self) -> Option<PickerError> {
        PickerError::from_status(self.status)
    }

    pub fn to_json_text(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Raw payload of an inbound cross-origin message.
///
/// Pickers may post either a structured object or its JSON text (the relay
/// path always forwards text).
#[derive(Debug, Clone, PartialEq)]
pub enum InboundPayload {
    Text(String),
    Structured(Value),
}

impl InboundPayload {
    /// Normalize either encoding into a [`ResultMessage`]
    pub fn parse(&self) -> Result<ResultMessage> {
        let message = match self {
            InboundPayload::Text(text) => serde_json::from_str(text)?,
            InboundPayload::Structured(value) => ResultMessage::deserialize(value)?,
        };
        Ok(message)
    }
}

impl From<String> for InboundPayload {
    fn from(text: String) -> Self {
        InboundPayload::Text(text)
    }
}

impl From<&str> for InboundPayload {
    fn from(text: &str) -> Self {
        InboundPayload::Text(text.to_string())
    }
}

impl From<Value> for InboundPayload {
    fn from(value: Value) -> Self {
        InboundPayload::Structured(value)
    }
}

impl From<&ResultMessage> for InboundPayload {
    fn from(message: &ResultMessage) -> Self {
        InboundPayload::Structured(serde_json::to_value(message).unwrap_or(Value::Null))
    }
}
