//! SCL Deferred
//!
//! A single-assignment result container:
//! - settles exactly once, into `resolved` or `rejected`
//! - observers attached after settlement run immediately
//! - `always` observers run after the outcome-specific ones
//!
//! A [`Deferred`] carries the mutation rights. A [`Promise`] is the read-only
//! view handed to whoever waits on the result.

mod deferred;
mod error;
mod state;

pub use deferred::{Deferred, Promise};
pub use error::DeferredError;
pub use state::{DeferredState, Settlement};

pub type Result<T> = std::result::Result<T, DeferredError>;
