//! Fixed-delay task scheduling with cancellation handles.
//!
//! DESIGN
//! ======
//! The simulated analysis reset, the simulated AI reply, and notice dismissal
//! are all "run this closure once after N milliseconds". [`Scheduler`] is the
//! seam: native builds spawn onto tokio, the browser build uses `gloo-timers`.
//!
//! Every scheduled task returns a [`TaskHandle`]. Cancelling the handle before
//! the delay elapses prevents the task from running; cancelling afterwards is a
//! no-op. Whether a caller cancels is a policy decision left to the caller.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Work run once when a scheduled delay elapses.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Cancellation handle for a scheduled task. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct TaskHandle {
    cancelled: Arc<AtomicBool>,
    fired: Arc<AtomicBool>,
}

impl TaskHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prevent the task from running if it has not run yet.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// True once the task body has started.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Run `task` unless this handle was cancelled. Backends call this when
    /// the delay elapses.
    pub fn fire(&self, task: Task) {
        if self.is_cancelled() {
            return;
        }
        if self.fired.swap(true, Ordering::SeqCst) {
            return;
        }
        task();
    }
}

/// Runs tasks once after a fixed delay.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle;
}

// =============================================================================
// TOKIO
// =============================================================================

/// Spawns each task onto a tokio runtime after sleeping for the delay.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    runtime: tokio::runtime::Handle,
}

#[cfg(not(target_arch = "wasm32"))]
impl TokioScheduler {
    #[must_use]
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self { runtime }
    }

    /// Bind to the runtime of the calling context, if there is one.
    #[must_use]
    pub fn try_current() -> Option<Self> {
        tokio::runtime::Handle::try_current().ok().map(Self::new)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::new();
        let pending = handle.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            pending.fire(task);
        });
        handle
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// Schedules tasks on the browser event loop via `setTimeout`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

#[cfg(feature = "hydrate")]
impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::new();
        let pending = handle.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(millis).await;
            pending.fire(task);
        });
        handle
    }
}
