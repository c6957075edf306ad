//! Embedding error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("Selection navigation carried no query")]
    MissingQuery,

    #[error("Selection query is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("Selection query is not JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid picker address: {0}")]
    InvalidAddress(#[from] url::ParseError),
}
