//! SCL File Picker
//!
//! Entry point for host applications: loads configuration, installs
//! logging, and assembles a [`FilePicker`] or [`EmbeddedPickerView`] from it.

mod config;
mod error;

pub use config::Config;
pub use error::CoreError;

pub use scl_deferred::{Deferred, DeferredError, DeferredState, Promise, Settlement};
pub use scl_embed::{EmbedConfig, EmbedError, EmbeddedPickerView, SelectionPromise};
pub use scl_picker::{
    send_selection, BusOpener, FilePicker, InitError, ManualScheduler, MessageBus, MessageEvent,
    MessagingMode, Opener, PickerHost, PickerPromise, PopupContext, PopupWindow, RelayForwarder,
    RelayFrame, Scheduler, SessionInfo, SessionPhase, TokioScheduler,
};
pub use scl_protocol::{
    InboundPayload, InitOptions, OpenOptions, PickerError, PopupProperties, ProtocolError,
    ResultMessage,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging from `RUST_LOG`, defaulting to `info`
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}

/// Initialize logging with an explicit filter directive, e.g. `Config::log_filter`.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_logging_with(filter: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_new(filter).map_err(|e| CoreError::Config(e.to_string()))?;

    if fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging already initialized");
    }
    Ok(())
}
