//! Picker error types
//!
//! Session failures are never errors here: they arrive as rejected
//! promises carrying a `PickerError` status. This enum only covers
//! synchronous setup problems.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitError {
    #[error("Invalid picker domain {domain}: {source}")]
    InvalidDomain {
        domain: String,
        #[source]
        source: scl_protocol::ProtocolError,
    },
}
