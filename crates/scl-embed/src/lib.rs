//! SCL File Picker embedding
//!
//! For native shells that host the picker page in an embedded web view
//! instead of a popup. The picker signals completion by navigating to a
//! reserved scheme; the shell intercepts that navigation and reads the
//! selection out of its query.

mod config;
mod error;
mod view;

pub use config::{EmbedConfig, DEFAULT_PICKER_ADDRESS, DEFAULT_REDIRECT_SCHEME};
pub use error::EmbedError;
pub use view::{decode_selection, EmbeddedPickerView, SelectionPromise};

pub type Result<T> = std::result::Result<T, EmbedError>;
