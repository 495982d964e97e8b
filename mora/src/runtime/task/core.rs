use super::JoinHandle;
use super::state::{COMPLETED, IDLE, NOTIFIED, QUEUED, RUNNING};
use crate::runtime::context;
use crate::runtime::scheduler::Scheduler;

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll, Waker};

/// A unit of work the run queue can execute.
///
/// Erases the output type of [`Task`] so tasks of any output can share
/// one queue.
pub(crate) trait Runnable: Send + Sync {
    fn run(self: Arc<Self>);
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A spawned future together with its scheduling state and, once it has
/// completed, its output.
pub(crate) struct Task<T> {
    /// `None` once the future has completed.
    future: Mutex<Option<BoxFuture<T>>>,

    /// Output waiting to be taken by the [`JoinHandle`].
    pub(crate) output: Mutex<Option<T>>,

    /// One of the constants in [`state`](super::state).
    pub(crate) state: AtomicUsize,

    scheduler: Arc<Scheduler>,

    /// Wakers of join handles awaiting this task.
    pub(crate) waiters: Mutex<Vec<Waker>>,
}

impl<T: Send + 'static> Task<T> {
    /// Creates a task in the `QUEUED` state.
    ///
    /// The caller is responsible for pushing it onto the scheduler.
    pub(crate) fn new<F>(future: F, scheduler: Arc<Scheduler>) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            future: Mutex::new(Some(Box::pin(future))),
            output: Mutex::new(None),
            state: AtomicUsize::new(QUEUED),
            scheduler,
            waiters: Mutex::new(Vec::new()),
        }
    }

    /// Polls the future once.
    ///
    /// - `Poll::Pending`: back to `IDLE`, or straight back onto the queue if
    ///   the task was woken during the poll.
    /// - `Poll::Ready`: stores the output and wakes every waiting handle.
    fn poll_once(self: Arc<Self>) {
        if self
            .state
            .compare_exchange(QUEUED, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let waker = Waker::from(self.clone());
        let mut cx = Context::from_waker(&waker);

        let poll = {
            let mut slot = self.future.lock().unwrap_or_else(PoisonError::into_inner);
            let Some(future) = slot.as_mut() else {
                return;
            };

            let poll = future.as_mut().poll(&mut cx);
            if poll.is_ready() {
                *slot = None;
            }
            poll
        };

        match poll {
            Poll::Pending => {
                if self
                    .state
                    .compare_exchange(RUNNING, IDLE, Ordering::AcqRel, Ordering::Acquire)
                    .is_err()
                {
                    self.state.store(QUEUED, Ordering::Release);
                    self.scheduler.push(self.clone());
                }
            }
            Poll::Ready(value) => {
                *self.output.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
                self.state.store(COMPLETED, Ordering::Release);

                let waiters =
                    std::mem::take(&mut *self.waiters.lock().unwrap_or_else(PoisonError::into_inner));
                for waiter in waiters {
                    waiter.wake();
                }
            }
        }
    }

    /// Requests another poll.
    ///
    /// `IDLE` tasks go back on the queue. A task being polled is marked
    /// `NOTIFIED` so it is requeued as soon as the poll returns. Queued and
    /// completed tasks are left alone.
    pub(crate) fn schedule(self: Arc<Self>) {
        loop {
            match self.state.load(Ordering::Acquire) {
                IDLE => {
                    if self
                        .state
                        .compare_exchange(IDLE, QUEUED, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        let scheduler = self.scheduler.clone();
                        scheduler.push(self);
                        return;
                    }
                }
                RUNNING => {
                    if self
                        .state
                        .compare_exchange(RUNNING, NOTIFIED, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        return;
                    }
                }
                _ => return,
            }
        }
    }
}

impl<T: Send + 'static> Runnable for Task<T> {
    fn run(self: Arc<Self>) {
        self.poll_once();
    }
}

/// Creates a task and queues it on `scheduler`.
pub(crate) fn spawn_on<F, T>(scheduler: &Arc<Scheduler>, future: F) -> JoinHandle<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let task = Arc::new(Task::new(future, scheduler.clone()));
    scheduler.push(task.clone());

    JoinHandle { task }
}

/// Spawns a future onto the current runtime.
///
/// The future starts running the next time the runtime gets to its run
/// queue, whether or not the returned handle is awaited. Awaiting the
/// handle yields the future's output.
///
/// # Panics
///
/// Panics if called outside of a running runtime.
///
/// # Examples
///
/// ```rust,ignore
/// let handle = mora::task::spawn(async { 40 + 2 });
/// assert_eq!(handle.await, 42);
/// ```
pub fn spawn<F, T>(future: F) -> JoinHandle<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let shared = context::expect_current("task::spawn");
    spawn_on(&shared.scheduler, future)
}
