//! SCL File Picker
//!
//! Opens the content-locker picker in a popup, watches it, and turns the
//! picker's cross-origin reply into a settled [`Promise`].
//!
//! ```text
//! open() ──► Opening ──► Watching ──► Idle
//!              │            │  ▲
//!              │ blocked    │  └─ message / poll / close / reopen
//!              ▼            │
//!             Idle ◄────────┘
//! ```
//!
//! At most one session is live. Opening a new one first rejects the old one
//! with `popup reopened`.

mod bus;
mod error;
mod host;
mod picker;
mod relay;
mod scheduler;
mod sender;
mod session;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use bus::{ListenerId, MessageBus, MessageEvent, MessageHandler};
pub use error::InitError;
pub use host::{MessagingMode, PickerHost, PopupWindow};
pub use picker::{FilePicker, PickerPromise};
pub use relay::{RelayForwarder, RelayFrame};
pub use scheduler::{ManualScheduler, Scheduler, Task, TimerHandle, TokioScheduler};
pub use sender::{send_selection, BusOpener, Opener, PopupContext};
pub use session::{SessionInfo, SessionPhase};

pub use scl_deferred::{Deferred, DeferredState, Promise, Settlement};
pub use scl_protocol::{
    InboundPayload, InitOptions, OpenOptions, PickerError, PopupProperties, ResultMessage,
};

pub type Result<T> = std::result::Result<T, InitError>;
