//! SCL Picker Protocol
//!
//! Everything that crosses the window boundary between the host page and
//! the content-locker picker:
//! - the result message `{status, statusText, data?}` and its status kinds
//! - normalization of text or structured inbound payloads
//! - open options with their defaults
//! - popup properties and the outbound picker address

mod address;
mod error;
mod message;
mod options;
mod status;

pub use address::{normalize_domain, PopupProperties};
pub use error::ProtocolError;
pub use message::{InboundPayload, MessageOutcome, ResultMessage};
pub use options::{InitOptions, OpenOptions, DEFAULT_LINK_TYPE, DEFAULT_MULTIPLE};
pub use status::{PickerError, FILE_SELECTED_STATUS, FILE_SELECTED_TEXT};

pub type Result<T> = std::result::Result<T, ProtocolError>;
