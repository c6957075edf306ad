//! Deferred and its promise view
//!
//! Observers are queued per outcome (`done`, `fail`) plus a shared `always`
//! queue. Queues are taken out of the lock before any observer runs, so an
//! observer may freely register further observers or settle other deferreds.

use parking_lot::Mutex;
use std::mem;
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::error::DeferredError;
use crate::state::{DeferredState, Settlement};
use crate::Result;

type ValueCallback<V> = Box<dyn FnOnce(&V) + Send>;
type AlwaysCallback<T, E> = Box<dyn FnOnce(&Settlement<T, E>) + Send>;

struct Inner<T, E> {
    settlement: Option<Arc<Settlement<T, E>>>,
    done: Vec<ValueCallback<T>>,
    fail: Vec<ValueCallback<E>>,
    always: Vec<AlwaysCallback<T, E>>,
    /// Live `Deferred` handles; promise views are not counted
    writers: usize,
}

impl<T, E> Inner<T, E> {
    fn new() -> Self {
        Self {
            settlement: None,
            done: Vec::new(),
            fail: Vec::new(),
            always: Vec::new(),
            writers: 1,
        }
    }

    fn state(&self) -> DeferredState {
        self.settlement
            .as_ref()
            .map(|s| s.state())
            .unwrap_or(DeferredState::Pending)
    }
}

type Shared<T, E> = Arc<Mutex<Inner<T, E>>>;

/// Settle-once result container holding the right to resolve or reject
pub struct Deferred<T, E> {
    inner: Shared<T, E>,
}

impl<T, E> Deferred<T, E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::new())),
        }
    }

    /// Read-only view for observers
    pub fn promise(&self) -> Promise<T, E> {
        Promise {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn state(&self) -> DeferredState {
        self.inner.lock().state()
    }

    /// Settle as resolved. Returns false if already settled.
    pub fn resolve(&self, value: T) -> bool {
        self.settle(Settlement::Resolved(value))
    }

    /// Settle as rejected. Returns false if already settled.
    pub fn reject(&self, reason: E) -> bool {
        self.settle(Settlement::Rejected(reason))
    }

    fn settle(&self, outcome: Settlement<T, E>) -> bool {
        let (settlement, done, fail) = {
            let mut inner = self.inner.lock();
            if !inner.state().can_transition_to(outcome.state()) {
                return false;
            }
            let settlement = Arc::new(outcome);
            inner.settlement = Some(Arc::clone(&settlement));
            (
                settlement,
                mem::take(&mut inner.done),
                mem::take(&mut inner.fail),
            )
        };

        match settlement.as_ref() {
            Settlement::Resolved(value) => {
                drop(fail);
                for callback in done {
                    callback(value);
                }
            }
            Settlement::Rejected(reason) => {
                drop(done);
                for callback in fail {
                    callback(reason);
                }
            }
        }

        // always runs after the outcome-specific queue has drained
        let always = mem::take(&mut self.inner.lock().always);
        for callback in always {
            callback(&settlement);
        }

        true
    }
}

impl<T, E> Default for Deferred<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Deferred<T, E> {
    fn clone(&self) -> Self {
        self.inner.lock().writers += 1;
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E> Drop for Deferred<T, E> {
    fn drop(&mut self) {
        let abandoned = {
            let mut inner = self.inner.lock();
            inner.writers -= 1;
            if inner.writers == 0 && inner.settlement.is_none() {
                Some((
                    mem::take(&mut inner.done),
                    mem::take(&mut inner.fail),
                    mem::take(&mut inner.always),
                ))
            } else {
                None
            }
        };

        // Nothing can settle this any more; release the queued observers
        // outside the lock.
        if let Some(queues) = abandoned {
            tracing::trace!("Dropping observers of an abandoned deferred");
            drop(queues);
        }
    }
}

impl<T, E> std::fmt::Debug for Deferred<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred")
            .field("state", &self.state())
            .finish()
    }
}

/// Observer-facing projection of a [`Deferred`]
pub struct Promise<T, E> {
    inner: Shared<T, E>,
}

impl<T, E> Promise<T, E> {
    pub fn state(&self) -> DeferredState {
        self.inner.lock().state()
    }

    pub fn is_pending(&self) -> bool {
        !self.state().is_settled()
    }

    /// Run `callback` with the value once resolved.
    /// Dropped without running if the deferred is (or becomes) rejected.
    pub fn done<F>(&self, callback: F) -> &Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        self.done_all([callback])
    }

    pub fn done_all<I, F>(&self, callbacks: I) -> &Self
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(&T) + Send + 'static,
    {
        let mut inner = self.inner.lock();
        match inner.settlement.clone() {
            None if inner.writers > 0 => inner.done.extend(
                callbacks
                    .into_iter()
                    .map(|callback| Box::new(callback) as ValueCallback<T>),
            ),
            None => {}
            Some(settlement) => {
                drop(inner);
                if let Settlement::Resolved(value) = settlement.as_ref() {
                    for callback in callbacks {
                        callback(value);
                    }
                }
            }
        }
        self
    }

    /// Run `callback` with the reason once rejected.
    /// Dropped without running if the deferred is (or becomes) resolved.
    pub fn fail<F>(&self, callback: F) -> &Self
    where
        F: FnOnce(&E) + Send + 'static,
    {
        self.fail_all([callback])
    }

    pub fn fail_all<I, F>(&self, callbacks: I) -> &Self
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(&E) + Send + 'static,
    {
        let mut inner = self.inner.lock();
        match inner.settlement.clone() {
            None if inner.writers > 0 => inner.fail.extend(
                callbacks
                    .into_iter()
                    .map(|callback| Box::new(callback) as ValueCallback<E>),
            ),
            None => {}
            Some(settlement) => {
                drop(inner);
                if let Settlement::Rejected(reason) = settlement.as_ref() {
                    for callback in callbacks {
                        callback(reason);
                    }
                }
            }
        }
        self
    }

    /// Run `callback` once settled, whatever the outcome
    pub fn always<F>(&self, callback: F) -> &Self
    where
        F: FnOnce(&Settlement<T, E>) + Send + 'static,
    {
        self.always_all([callback])
    }

    pub fn always_all<I, F>(&self, callbacks: I) -> &Self
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(&Settlement<T, E>) + Send + 'static,
    {
        let mut inner = self.inner.lock();
        match inner.settlement.clone() {
            None if inner.writers > 0 => inner.always.extend(
                callbacks
                    .into_iter()
                    .map(|callback| Box::new(callback) as AlwaysCallback<T, E>),
            ),
            None => {}
            Some(settlement) => {
                drop(inner);
                for callback in callbacks {
                    callback(&settlement);
                }
            }
        }
        self
    }

    /// `done(on_success)` followed by `fail(on_error)`
    pub fn then<S, F>(&self, on_success: S, on_error: F) -> &Self
    where
        S: FnOnce(&T) + Send + 'static,
        F: FnOnce(&E) + Send + 'static,
    {
        self.done(on_success).fail(on_error)
    }

    /// Snapshot of the outcome, if settled
    pub fn settlement(&self) -> Option<Settlement<T, E>>
    where
        T: Clone,
        E: Clone,
    {
        self.inner.lock().settlement.as_deref().cloned()
    }

    /// Wait for the outcome.
    ///
    /// Fails with [`DeferredError::Abandoned`] if every `Deferred` handle is
    /// dropped while still pending.
    pub async fn settled(&self) -> Result<Settlement<T, E>>
    where
        T: Clone + Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.always(move |settlement: &Settlement<T, E>| {
            let _ = tx.send(settlement.clone());
        });
        rx.await.map_err(|_| DeferredError::Abandoned)
    }
}

impl<T, E> Clone for Promise<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E> std::fmt::Debug for Promise<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Promise")
            .field("state", &self.state())
            .finish()
    }
}
