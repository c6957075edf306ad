//! Cancellable one-shot timers
//!
//! The liveness poll is a chain of one-shot tasks; every link is reachable
//! through a [`TimerHandle`] so teardown can stop it deterministically.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

pub type Task = Box<dyn FnOnce() + Send>;

pub trait Scheduler: Send + Sync {
    /// Run `task` once after `delay`.
    ///
    /// Implementations must never run the task before returning: callers
    /// schedule while holding their own locks.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;
}

#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
    abort: Option<AbortHandle>,
}

impl TimerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_abort(mut self, abort: AbortHandle) -> Self {
        self.abort = Some(abort);
        self
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(abort) = &self.abort {
            abort.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Timers backed by a tokio runtime
#[derive(Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Scheduler on the runtime of the calling task, if any
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let timer = TimerHandle::new();
        let guard = timer.clone();
        let join = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if !guard.is_cancelled() {
                task();
            }
        });
        timer.with_abort(join.abort_handle())
    }
}

struct Entry {
    due: Duration,
    seq: u64,
    timer: TimerHandle,
    task: Task,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    seq: u64,
    queue: Vec<Entry>,
}

/// Virtual-clock scheduler driven explicitly through [`ManualScheduler::advance`].
///
/// Suits hosts that pump their own event loop, and deterministic tests.
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Timers still waiting to fire
    pub fn pending(&self) -> usize {
        self.state
            .lock()
            .queue
            .iter()
            .filter(|entry| !entry.timer.is_cancelled())
            .count()
    }

    /// Move the clock forward, running every task that falls due on the way
    /// (including tasks scheduled by those tasks). Returns how many ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.lock().now + by;
        let mut ran = 0;

        loop {
            let next = {
                let mut state = self.state.lock();
                state.queue.retain(|entry| !entry.timer.is_cancelled());
                let index = state
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.due <= target)
                    .min_by_key(|(_, entry)| (entry.due, entry.seq))
                    .map(|(index, _)| index);

                match index {
                    Some(index) => {
                        let entry = state.queue.swap_remove(index);
                        state.now = entry.due;
                        Some(entry.task)
                    }
                    None => {
                        state.now = target;
                        None
                    }
                }
            };

            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }

        ran
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let timer = TimerHandle::new();
        let mut state = self.state.lock();
        state.queue.retain(|entry| !entry.timer.is_cancelled());
        state.seq += 1;
        let entry = Entry {
            due: state.now + delay,
            seq: state.seq,
            timer: timer.clone(),
            task,
        };
        state.queue.push(entry);
        timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Task) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let make = move || {
            let c = c.clone();
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }) as Task
        };
        (count, make)
    }

    #[test]
    fn test_manual_runs_due_tasks_only() {
        let scheduler = ManualScheduler::new();
        let (count, make) = counter();

        scheduler.schedule(Duration::from_millis(100), make());
        scheduler.schedule(Duration::from_millis(300), make());

        assert_eq!(scheduler.advance(Duration::from_millis(99)), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.now(), Duration::from_millis(100));
    }

    #[test]
    fn test_manual_cancelled_tasks_never_run() {
        let scheduler = ManualScheduler::new();
        let (count, make) = counter();

        let timer = scheduler.schedule(Duration::from_millis(10), make());
        timer.cancel();

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.advance(Duration::from_secs(1)), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_manual_chained_tasks_within_window() {
        let scheduler = Arc::new(ManualScheduler::new());
        let (count, make) = counter();

        let chained = scheduler.clone();
        let follow_up = make();
        scheduler.schedule(
            Duration::from_millis(100),
            Box::new(move || {
                chained.schedule(Duration::from_millis(100), follow_up);
            }),
        );

        assert_eq!(scheduler.advance(Duration::from_millis(250)), 2);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_tokio_scheduler_runs_and_cancels() {
        let scheduler = TokioScheduler::current().unwrap();
        let (count, make) = counter();

        scheduler.schedule(Duration::from_millis(5), make());
        let cancelled = scheduler.schedule(Duration::from_millis(5), make());
        cancelled.cancel();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(cancelled.is_cancelled());
    }
}
