//! File picker session manager
//!
//! Owns the single live popup session. Every path out of a session
//! (picker reply, liveness poll, explicit close, reopen, failed
//! precondition) ends in the caller's promise settling; the message
//! listener is removed by an `always` observer in all of them.

use parking_lot::Mutex;
use std::sync::Arc;

use scl_deferred::{Deferred, Promise, Settlement};
use scl_protocol::{
    normalize_domain, InitOptions, MessageOutcome, OpenOptions, PickerError, PopupProperties,
    ResultMessage,
};

use crate::bus::{MessageBus, MessageEvent, MessageHandler};
use crate::error::InitError;
use crate::host::{MessagingMode, PickerHost};
use crate::relay::MountedRelay;
use crate::scheduler::{Scheduler, TimerHandle};
use crate::session::{PopupSession, SessionInfo, SessionPhase};
use crate::Result;

/// What `open()` hands back: resolves with the picker's success message,
/// rejects with a failure message (`status < 0`).
pub type PickerPromise = Promise<ResultMessage, ResultMessage>;

#[derive(Default)]
struct PickerState {
    initialized: bool,
    domain: Option<String>,
    relay: Option<MountedRelay>,
    session: Option<PopupSession>,
    phase: SessionPhase,
}

impl PickerState {
    fn set_phase(&mut self, phase: SessionPhase) {
        if !self.phase.can_transition_to(phase) {
            tracing::warn!(from = %self.phase, to = %phase, "Unexpected session phase change");
        }
        self.phase = phase;
    }

    /// Detach the live session, if any, and go idle
    fn take_session(&mut self) -> Option<PopupSession> {
        let session = self.session.take();
        if session.is_some() {
            self.set_phase(SessionPhase::Idle);
        }
        session
    }

    /// Back out of `Opening` without a window of our own
    fn abandon_launch(&mut self) {
        let phase = if self.session.is_some() {
            SessionPhase::Watching
        } else {
            SessionPhase::Idle
        };
        self.set_phase(phase);
    }
}

pub struct FilePicker {
    host: Arc<dyn PickerHost>,
    scheduler: Arc<dyn Scheduler>,
    bus: MessageBus,
    properties: PopupProperties,
    state: Arc<Mutex<PickerState>>,
}

impl FilePicker {
    pub fn new(host: Arc<dyn PickerHost>, scheduler: Arc<dyn Scheduler>, bus: MessageBus) -> Self {
        Self::with_properties(host, scheduler, bus, PopupProperties::default())
    }

    pub fn with_properties(
        host: Arc<dyn PickerHost>,
        scheduler: Arc<dyn Scheduler>,
        bus: MessageBus,
        properties: PopupProperties,
    ) -> Self {
        Self {
            host,
            scheduler,
            bus,
            properties,
            state: Arc::new(Mutex::new(PickerState::default())),
        }
    }

    pub fn bus(&self) -> &MessageBus {
        &self.bus
    }

    pub fn properties(&self) -> &PopupProperties {
        &self.properties
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lock().initialized
    }

    pub fn domain(&self) -> Option<String> {
        self.state.lock().domain.clone()
    }

    /// Origin picker messages must advertise, once a domain is configured
    pub fn popup_origin(&self) -> Option<String> {
        self.domain().map(|domain| self.properties.origin(&domain))
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.lock().phase
    }

    pub fn active_session(&self) -> Option<SessionInfo> {
        self.state.lock().session.as_ref().map(PopupSession::info)
    }

    /// Configure the picker domain.
    ///
    /// A missing or blank domain still marks the picker initialized, so the
    /// next `open()` fails with `missing domain`. Calling again replaces the
    /// domain and, in relay mode, the relay frame.
    pub fn initialize(&self, options: InitOptions) -> Result<()> {
        let Some(domain) = options.domain.as_deref().and_then(normalize_domain) else {
            tracing::warn!("Picker initialized without a domain");
            let previous = {
                let mut state = self.state.lock();
                state.initialized = true;
                state.domain = None;
                state.relay.take()
            };
            self.unmount_relay(previous);
            return Ok(());
        };

        let relay_address =
            self.properties
                .relay_address(&domain)
                .map_err(|source| InitError::InvalidDomain {
                    domain: domain.clone(),
                    source,
                })?;

        let previous = {
            let mut state = self.state.lock();
            state.initialized = true;
            state.domain = Some(domain.clone());
            state.relay.take()
        };
        self.unmount_relay(previous);

        if self.host.messaging_mode() == MessagingMode::Relay {
            let relay = self.mount_relay(relay_address);
            self.state.lock().relay = Some(relay);
        }

        tracing::info!(domain = %domain, "Picker initialized");
        Ok(())
    }

    fn mount_relay(&self, address: url::Url) -> MountedRelay {
        let frame_id = self.properties.relay_frame_id.clone();
        let host = Arc::clone(&self.host);
        let (task_id, task_address) = (frame_id.clone(), address.clone());

        // Deferred so an inline initialize() never blocks on frame creation
        let mount = self.scheduler.schedule(
            std::time::Duration::ZERO,
            Box::new(move || {
                tracing::debug!(frame_id = %task_id, address = %task_address, "Mounting relay frame");
                host.mount_relay_frame(&task_id, &task_address);
            }),
        );

        MountedRelay {
            frame_id,
            address,
            mount,
        }
    }

    fn unmount_relay(&self, relay: Option<MountedRelay>) {
        if let Some(relay) = relay {
            relay.mount.cancel();
            self.host.unmount_relay_frame(&relay.frame_id);
            tracing::debug!(frame_id = %relay.frame_id, address = %relay.address, "Removed relay frame");
        }
    }

    /// Start a picker session.
    ///
    /// Any live session is rejected with `popup reopened` and its window
    /// closed before anything else happens. Precondition failures and a
    /// blocked popup reject the returned promise before this returns.
    pub fn open(&self, options: &OpenOptions) -> PickerPromise {
        self.close_with(PickerError::PopupReopened);

        let picker: Deferred<ResultMessage, ResultMessage> = Deferred::new();
        let promise = picker.promise();

        let domain = match self.check_preconditions() {
            Ok(domain) => domain,
            Err(kind) => {
                tracing::warn!(status = kind.status(), reason = %kind, "Picker session refused");
                picker.reject(kind.into());
                return promise;
            }
        };

        let session_id = PopupSession::next_id();
        let origin = self.properties.origin(&domain);

        let listener = self.bus.subscribe(self.message_listener(
            picker.clone(),
            origin.clone(),
            session_id.clone(),
        ));
        let bus = self.bus.clone();
        let state = Arc::clone(&self.state);
        let settled_id = session_id.clone();
        promise.always(move |settlement: &Settlement<ResultMessage, ResultMessage>| {
            bus.unsubscribe(listener);
            Self::finish_session(&state, &settled_id, settlement);
        });

        let forward = picker.clone();
        self.launch(&domain, origin, options, session_id)
            .fail(move |message: &ResultMessage| {
                forward.reject(message.clone());
            });

        promise
    }

    /// Close the live popup as if the user had closed it.
    ///
    /// Returns false if there was no live session to close.
    pub fn close(&self) -> bool {
        self.close_with(PickerError::PopupClosed)
    }

    fn check_preconditions(&self) -> std::result::Result<String, PickerError> {
        if !self.host.messaging_mode().is_supported() {
            return Err(PickerError::NotSupported);
        }
        let state = self.state.lock();
        if !state.initialized {
            return Err(PickerError::NotInitialized);
        }
        state.domain.clone().ok_or(PickerError::MissingDomain)
    }

    fn close_with(&self, kind: PickerError) -> bool {
        // A window already closed but not yet seen by the poll still counts
        let live = self.state.lock().take_session();

        match live {
            Some(session) => {
                Self::end_session(session, kind);
                true
            }
            None => false,
        }
    }

    /// Reject a detached session and close its window.
    ///
    /// Must be called without the state lock: caller observers run here and
    /// may open a new session.
    fn end_session(mut session: PopupSession, kind: PickerError) {
        tracing::info!(
            session_id = %session.id,
            status = kind.status(),
            reason = %kind,
            "Closing picker popup"
        );
        session.cancel_watch();
        session.deferred.reject(kind.into());
        if !session.window.is_closed() {
            session.window.close();
        }
    }

    /// Open the popup window and start watching it
    fn launch(
        &self,
        domain: &str,
        origin: String,
        options: &OpenOptions,
        session_id: String,
    ) -> Promise<(), ResultMessage> {
        let popup: Deferred<(), ResultMessage> = Deferred::new();
        let promise = popup.promise();

        // Observers of an earlier rejection may have opened a session already
        let displaced = {
            let mut state = self.state.lock();
            let displaced = state.take_session();
            state.set_phase(SessionPhase::Opening);
            displaced
        };
        if let Some(session) = displaced {
            Self::end_session(session, PickerError::PopupReopened);
        }

        let caller_origin = self.host.caller_origin();
        let address = match self
            .properties
            .popup_address(domain, &caller_origin, options)
        {
            Ok(address) => address,
            Err(e) => {
                tracing::error!(error = %e, domain = %domain, "Failed to build picker address");
                self.state.lock().abandon_launch();
                popup.reject(PickerError::PopupBlocked.into());
                return promise;
            }
        };

        let Some(window) = self.host.open_window(
            &address,
            &self.properties.window_name,
            &self.properties.window_features(),
        ) else {
            tracing::warn!(session_id = %session_id, address = %address, "Picker popup blocked");
            self.state.lock().abandon_launch();
            popup.reject(PickerError::PopupBlocked.into());
            return promise;
        };

        let mut session = PopupSession::new(session_id.clone(), origin, window, popup);

        // The first poll needs the state lock, so it cannot run before the
        // session is stored
        let displaced = {
            let mut state = self.state.lock();
            session.timer = Some(self.schedule_watch(session_id.clone()));
            let displaced = state.session.replace(session);
            state.set_phase(SessionPhase::Watching);
            displaced
        };
        if let Some(session) = displaced {
            Self::end_session(session, PickerError::PopupReopened);
        }

        tracing::info!(session_id = %session_id, address = %address, "Opened picker popup");
        promise
    }

    fn schedule_watch(&self, session_id: String) -> TimerHandle {
        let picker = self.clone();
        self.scheduler.schedule(
            self.properties.poll_interval(),
            Box::new(move || picker.watch_tick(&session_id)),
        )
    }

    /// One liveness poll: reject if the window is gone, otherwise poll again
    fn watch_tick(&self, session_id: &str) {
        let closed = {
            let mut state = self.state.lock();
            let Some(session) = state.session.as_mut().filter(|s| s.id == session_id) else {
                return;
            };
            if session.window.is_closed() {
                session.timer = None;
                Some(session.deferred.clone())
            } else {
                session.timer = Some(self.schedule_watch(session_id.to_string()));
                None
            }
        };

        if let Some(popup) = closed {
            tracing::info!(session_id = %session_id, "Picker popup closed by user");
            popup.reject(PickerError::PopupClosed.into());
        }
    }

    fn message_listener(
        &self,
        picker: Deferred<ResultMessage, ResultMessage>,
        origin: String,
        session_id: String,
    ) -> MessageHandler {
        let state = Arc::clone(&self.state);

        Arc::new(move |event: &MessageEvent| {
            // Unrelated cross-window traffic is expected; never treat it as failure
            if event.origin != origin {
                tracing::debug!(origin = %event.origin, "Ignoring message from foreign origin");
                return;
            }

            let message = match event.payload.parse() {
                Ok(message) => message,
                Err(e) => {
                    tracing::debug!(error = %e, "Dropping malformed picker message");
                    return;
                }
            };

            match message.outcome() {
                MessageOutcome::Success => {
                    let popup = {
                        let mut state = state.lock();
                        state
                            .session
                            .as_mut()
                            .filter(|s| s.id == session_id)
                            .map(|s| {
                                s.cancel_watch();
                                s.deferred.clone()
                            })
                    };
                    if let Some(popup) = popup {
                        popup.resolve(());
                    }
                    picker.resolve(message);
                }
                MessageOutcome::Failure => {
                    if let Some(kind) = message.error_kind() {
                        tracing::debug!(session_id = %session_id, kind = ?kind, "Picker reported a standard failure");
                    }
                    picker.reject(message);
                }
                MessageOutcome::Ignored => {
                    tracing::debug!(session_id = %session_id, "Ignoring status 0 message");
                }
            }
        })
    }

    /// Tear down the session record once the caller's promise settled
    fn finish_session(
        state: &Mutex<PickerState>,
        session_id: &str,
        settlement: &Settlement<ResultMessage, ResultMessage>,
    ) {
        let finished = {
            let mut state = state.lock();
            if state.session.as_ref().is_some_and(|s| s.id == session_id) {
                state.set_phase(SessionPhase::Idle);
                state.session.take()
            } else {
                None
            }
        };

        if let Some(mut session) = finished {
            session.cancel_watch();
        }

        match settlement {
            Settlement::Resolved(message) => tracing::info!(
                session_id = %session_id,
                status = message.status,
                "Picker session resolved"
            ),
            Settlement::Rejected(message) => tracing::info!(
                session_id = %session_id,
                status = message.status,
                status_text = %message.status_text,
                "Picker session rejected"
            ),
        }
    }
}

impl Clone for FilePicker {
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
            scheduler: Arc::clone(&self.scheduler),
            bus: self.bus.clone(),
            properties: self.properties.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use crate::host::PopupWindow;
    use crate::testing::StubHost;
    use scl_deferred::DeferredState;
    use serde_json::json;
    use std::time::Duration;

    const DOMAIN: &str = "files.example.com";
    const ORIGIN: &str = "http://files.example.com";

    struct Fixture {
        host: Arc<StubHost>,
        scheduler: Arc<ManualScheduler>,
        picker: FilePicker,
    }

    fn fixture_with(host: StubHost) -> Fixture {
        let host = Arc::new(host);
        let scheduler = Arc::new(ManualScheduler::new());
        let picker = FilePicker::new(host.clone(), scheduler.clone(), MessageBus::new());
        Fixture {
            host,
            scheduler,
            picker,
        }
    }

    fn fixture() -> Fixture {
        let fx = fixture_with(StubHost::new("https://host.example"));
        fx.picker
            .initialize(InitOptions::with_domain(DOMAIN))
            .unwrap();
        fx
    }

    fn rejection(promise: &PickerPromise) -> Option<(i32, String)> {
        promise
            .settlement()
            .and_then(|s| s.reason().map(|m| (m.status, m.status_text.clone())))
    }

    #[test]
    fn test_not_initialized() {
        let fx = fixture_with(StubHost::new("https://host.example"));
        let promise = fx.picker.open(&OpenOptions::default());

        assert_eq!(rejection(&promise), Some((-2, "not initialized".to_string())));
        assert!(fx.host.opened().is_empty());
        assert_eq!(fx.picker.bus().listener_count(), 0);
    }

    #[test]
    fn test_not_supported_checked_first() {
        let fx = fixture_with(
            StubHost::new("https://host.example").with_mode(MessagingMode::Unsupported),
        );
        let promise = fx.picker.open(&OpenOptions::default());
        assert_eq!(rejection(&promise), Some((-1, "not supported".to_string())));
    }

    #[test]
    fn test_missing_domain() {
        let fx = fixture_with(StubHost::new("https://host.example"));
        fx.picker.initialize(InitOptions::default()).unwrap();
        assert!(fx.picker.is_initialized());

        let promise = fx.picker.open(&OpenOptions::default());
        assert_eq!(rejection(&promise), Some((-3, "missing domain".to_string())));
        assert!(fx.host.opened().is_empty());
        assert_eq!(fx.scheduler.pending(), 0);
    }

    #[test]
    fn test_initialize_strips_scheme() {
        let fx = fixture_with(StubHost::new("https://host.example"));
        fx.picker
            .initialize(InitOptions::with_domain("https://files.example.com"))
            .unwrap();
        assert_eq!(fx.picker.domain().as_deref(), Some(DOMAIN));
        assert_eq!(fx.picker.popup_origin().as_deref(), Some(ORIGIN));
    }

    #[test]
    fn test_initialize_rejects_invalid_domain() {
        let fx = fixture_with(StubHost::new("https://host.example"));
        let result = fx.picker.initialize(InitOptions::with_domain("files.example.com:notaport"));
        assert!(matches!(result, Err(InitError::InvalidDomain { .. })));
        assert!(!fx.picker.is_initialized());
    }

    #[test]
    fn test_open_builds_address_and_watches() {
        let fx = fixture();
        let promise = fx.picker.open(&OpenOptions::default());

        assert_eq!(promise.state(), DeferredState::Pending);
        assert_eq!(fx.picker.phase(), SessionPhase::Watching);
        assert_eq!(fx.picker.bus().listener_count(), 1);
        assert_eq!(fx.scheduler.pending(), 1);

        let opened = fx.host.opened();
        assert_eq!(opened.len(), 1);
        assert_eq!(
            opened[0].address.as_str(),
            "http://files.example.com/path/to/popup?origin=https%3A%2F%2Fhost.example&linkType=preview&multiple=false"
        );
        assert_eq!(opened[0].name, "SCLFilePicker_popup");
        assert_eq!(opened[0].features, "height=520,width=590");

        let info = fx.picker.active_session().unwrap();
        assert_eq!(info.origin, ORIGIN);
        assert!(!info.window_closed);
    }

    #[test]
    fn test_success_message_resolves_and_cleans_up() {
        let fx = fixture();
        let promise = fx.picker.open(&OpenOptions::default());

        let reply = ResultMessage::file_selected(json!({ "id": 42 }));
        fx.picker
            .bus()
            .dispatch(&MessageEvent::new(ORIGIN, &reply));

        assert_eq!(promise.settlement(), Some(Settlement::Resolved(reply)));
        assert_eq!(fx.picker.bus().listener_count(), 0);
        assert_eq!(fx.scheduler.pending(), 0);
        assert_eq!(fx.picker.phase(), SessionPhase::Idle);
        assert!(fx.picker.active_session().is_none());
    }

    #[test]
    fn test_text_payload_is_accepted() {
        let fx = fixture();
        let promise = fx.picker.open(&OpenOptions::default());

        fx.picker.bus().dispatch(&MessageEvent::new(
            ORIGIN,
            r#"{"status":2,"statusText":"files selected","data":[1,2]}"#,
        ));

        let settlement = promise.settlement().unwrap();
        assert_eq!(settlement.value().map(|m| m.status), Some(2));
    }

    #[test]
    fn test_failure_message_rejects() {
        let fx = fixture();
        let promise = fx.picker.open(&OpenOptions::default());

        fx.picker.bus().dispatch(&MessageEvent::new(
            ORIGIN,
            json!({ "status": -10, "statusText": "quota exceeded" }),
        ));

        assert_eq!(rejection(&promise), Some((-10, "quota exceeded".to_string())));
        assert_eq!(fx.picker.bus().listener_count(), 0);
        assert_eq!(fx.scheduler.pending(), 0);
    }

    #[test]
    fn test_foreign_zero_and_malformed_messages_are_ignored() {
        let fx = fixture();
        let promise = fx.picker.open(&OpenOptions::default());
        let bus = fx.picker.bus();

        bus.dispatch(&MessageEvent::new(
            "http://evil.example",
            &ResultMessage::file_selected(json!(1)),
        ));
        bus.dispatch(&MessageEvent::new(
            "https://files.example.com",
            &ResultMessage::file_selected(json!(1)),
        ));
        bus.dispatch(&MessageEvent::new(ORIGIN, json!({ "status": 0 })));
        bus.dispatch(&MessageEvent::new(ORIGIN, "<html>"));

        assert!(promise.is_pending());
        assert_eq!(fx.picker.phase(), SessionPhase::Watching);
        assert_eq!(bus.listener_count(), 1);
    }

    #[test]
    fn test_liveness_poll_detects_close() {
        let fx = fixture();
        let promise = fx.picker.open(&OpenOptions::default());

        // Still open: the poll keeps rescheduling itself
        fx.scheduler.advance(Duration::from_millis(350));
        assert!(promise.is_pending());
        assert_eq!(fx.scheduler.pending(), 1);

        fx.host.last_window().unwrap().close();
        fx.scheduler.advance(Duration::from_millis(100));

        assert_eq!(rejection(&promise), Some((-5, "popup closed".to_string())));
        assert_eq!(fx.scheduler.pending(), 0);
        assert_eq!(fx.picker.bus().listener_count(), 0);
        assert_eq!(fx.picker.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_popup_blocked() {
        let fx = fixture();
        fx.host.set_blocking(true);
        let promise = fx.picker.open(&OpenOptions::default());

        assert_eq!(rejection(&promise), Some((-4, "popup blocked".to_string())));
        assert_eq!(fx.scheduler.pending(), 0);
        assert_eq!(fx.picker.bus().listener_count(), 0);
        assert_eq!(fx.picker.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_reopen_preempts_previous_session() {
        let fx = fixture();
        let first = fx.picker.open(&OpenOptions::default());
        let first_window = fx.host.last_window().unwrap();

        let order = Arc::new(Mutex::new(Vec::new()));
        let o = order.clone();
        first.fail(move |m: &ResultMessage| o.lock().push(m.status));

        let second = fx.picker.open(&OpenOptions::new().multiple(true));

        assert_eq!(rejection(&first), Some((-6, "popup reopened".to_string())));
        assert_eq!(*order.lock(), vec![-6]);
        assert!(first_window.is_closed());
        assert!(second.is_pending());
        assert_eq!(fx.host.opened().len(), 2);
        assert_eq!(fx.picker.bus().listener_count(), 1);
        assert_eq!(fx.scheduler.pending(), 1);
    }

    #[test]
    fn test_reopen_before_poll_notices_close() {
        let fx = fixture();
        let first = fx.picker.open(&OpenOptions::default());
        fx.host.last_window().unwrap().close();

        let second = fx.picker.open(&OpenOptions::default());
        assert_eq!(rejection(&first), Some((-6, "popup reopened".to_string())));
        assert!(second.is_pending());
        assert_eq!(fx.scheduler.pending(), 1);
    }

    #[test]
    fn test_retry_from_fail_observer_keeps_one_session() {
        let fx = fixture();
        let first = fx.picker.open(&OpenOptions::default());

        let retried: Arc<Mutex<Option<PickerPromise>>> = Arc::new(Mutex::new(None));
        let (picker, slot) = (fx.picker.clone(), retried.clone());
        first.fail(move |_: &ResultMessage| {
            *slot.lock() = Some(picker.open(&OpenOptions::default()));
        });

        let second = fx.picker.open(&OpenOptions::default());
        let retried = retried.lock().clone().unwrap();

        assert_eq!(rejection(&first).map(|r| r.0), Some(-6));
        assert_eq!(rejection(&retried).map(|r| r.0), Some(-6));
        assert!(second.is_pending());

        let opened = fx.host.opened();
        assert_eq!(opened.len(), 3);
        assert_eq!(opened.iter().filter(|w| !w.window.is_closed()).count(), 1);
        assert!(!opened[2].window.is_closed());
        assert_eq!(fx.picker.bus().listener_count(), 1);
        assert_eq!(fx.scheduler.pending(), 1);
        assert_eq!(fx.picker.phase(), SessionPhase::Watching);

        fx.picker
            .bus()
            .dispatch(&MessageEvent::new(ORIGIN, &ResultMessage::file_selected(json!(9))));
        assert_eq!(second.state(), DeferredState::Resolved);
        assert_eq!(fx.picker.bus().listener_count(), 0);
    }

    #[test]
    fn test_close_is_explicit_popup_closed() {
        let fx = fixture();
        assert!(!fx.picker.close());

        let promise = fx.picker.open(&OpenOptions::default());
        assert!(fx.picker.close());
        assert_eq!(rejection(&promise), Some((-5, "popup closed".to_string())));
        assert!(fx.host.last_window().unwrap().is_closed());
        assert!(!fx.picker.close());
    }

    #[test]
    fn test_picker_accepts_new_session_after_settlement() {
        let fx = fixture();
        let first = fx.picker.open(&OpenOptions::default());
        fx.picker.close();
        assert!(!first.is_pending());

        let second = fx.picker.open(&OpenOptions::default());
        fx.picker
            .bus()
            .dispatch(&MessageEvent::new(ORIGIN, &ResultMessage::file_selected(json!("f"))));
        assert_eq!(second.state(), DeferredState::Resolved);
    }

    #[test]
    fn test_relay_frame_mounted_and_replaced() {
        let fx = fixture_with(StubHost::new("https://host.example").with_mode(MessagingMode::Relay));

        fx.picker
            .initialize(InitOptions::with_domain("one.example.com"))
            .unwrap();
        // Mount is deferred
        assert!(fx.host.relay_frames().is_empty());
        fx.scheduler.advance(Duration::ZERO);
        assert_eq!(
            fx.host.relay_frames()[0].1.as_str(),
            "http://one.example.com/path/to/iframe.htm"
        );

        fx.picker
            .initialize(InitOptions::with_domain("two.example.com"))
            .unwrap();
        fx.scheduler.advance(Duration::ZERO);

        let frames = fx.host.relay_frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].0, "SCLFilePicker_iframe");
        assert_eq!(frames[0].1.as_str(), "http://two.example.com/path/to/iframe.htm");
    }

    #[test]
    fn test_direct_mode_mounts_no_relay() {
        let fx = fixture();
        fx.scheduler.advance(Duration::from_millis(1));
        assert!(fx.host.relay_frames().is_empty());
    }
}
