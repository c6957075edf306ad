//! Deferred error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DeferredError {
    /// Every settling handle went away while the result was still pending
    #[error("Deferred abandoned before settling")]
    Abandoned,
}
