//! Protocol error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed message payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid picker address: {0}")]
    InvalidAddress(#[from] url::ParseError),
}
