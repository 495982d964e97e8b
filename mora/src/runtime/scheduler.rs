use crate::runtime::task::Runnable;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

/// Run queue of the runtime.
///
/// Woken tasks are pushed here and drained by the thread driving
/// [`Runtime::block_on`](crate::Runtime::block_on). When there is nothing
/// to run, that thread parks on the condition variable until a task or the
/// main future is woken, or until the next timer deadline.
pub(crate) struct Scheduler {
    /// Tasks ready to be polled, oldest first.
    queue: Mutex<VecDeque<Arc<dyn Runnable>>>,

    /// Set by [`notify`](Self::notify), cleared by [`park`](Self::park).
    ///
    /// Prevents a wake-up that races with parking from being lost.
    notified: Mutex<bool>,

    condvar: Condvar,

    shutdown: AtomicBool,
}

impl Scheduler {
    pub(crate) fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            notified: Mutex::new(false),
            condvar: Condvar::new(),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Queues a task and wakes the driver.
    ///
    /// Tasks pushed after shutdown are dropped.
    pub(crate) fn push(&self, task: Arc<dyn Runnable>) {
        if self.shutdown.load(Ordering::Acquire) {
            return;
        }

        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(task);
        self.notify();
    }

    pub(crate) fn pop(&self) -> Option<Arc<dyn Runnable>> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Wakes the driver if it is parked, or makes its next park return
    /// immediately.
    pub(crate) fn notify(&self) {
        *self.notified.lock().unwrap_or_else(PoisonError::into_inner) = true;
        self.condvar.notify_one();
    }

    /// Blocks until notified or until `timeout` elapses.
    ///
    /// `None` waits for a notification only.
    pub(crate) fn park(&self, timeout: Option<Duration>) {
        let mut notified = self.notified.lock().unwrap_or_else(PoisonError::into_inner);

        if !*notified && !self.shutdown.load(Ordering::Acquire) {
            notified = match timeout {
                Some(timeout) => {
                    self.condvar
                        .wait_timeout(notified, timeout)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0
                }
                None => self
                    .condvar
                    .wait(notified)
                    .unwrap_or_else(PoisonError::into_inner),
            };
        }

        *notified = false;
    }

    /// Stops accepting tasks and releases the queued ones.
    pub(crate) fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);

        let drained: Vec<_> = self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        drop(drained);

        self.condvar.notify_all();
    }
}
