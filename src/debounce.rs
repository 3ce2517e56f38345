//! A reusable single-slot debounce timer.

use std::{
    future::Future,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use tokio::task::JoinHandle;

/// Delays a piece of work until a quiet period has elapsed.
///
/// A debouncer owns at most one pending timer. Scheduling a call while a
/// timer is armed aborts the armed timer and replaces it, so only the last
/// call within the window actually executes; intermediate calls are
/// superseded, not queued.
#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Debouncer {
    /// Create a debouncer that waits `delay` after the most recent call
    /// before executing it.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Schedule `work` to run after the delay, replacing any pending call.
    pub fn call<F>(&self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(armed) = pending.take() {
            armed.abort();
        }

        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            work.await;
        }));
    }

    /// Disarm the pending call, if any, without running it.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(armed) = pending.take() {
            armed.abort();
        }
    }
}
