use crate::events::Sink;
use crate::runtime::context::enter_context;
use crate::runtime::scheduler::Scheduler;
use crate::runtime::task::{self, JoinHandle};
use crate::runtime::timer::{TimerQueue, TimerSlot};

use rand::rngs::StdRng;

use std::future::Future;
use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, Wake, Waker};
use std::time::Instant;

/// State of a runtime reachable from its futures through the thread-local
/// context.
pub(crate) struct Shared {
    pub(crate) scheduler: Arc<Scheduler>,

    timers: Mutex<TimerQueue>,

    /// Where wrapped operations and timers report their events.
    pub(crate) sink: Arc<dyn Sink>,

    /// Source of random delays.
    rng: Mutex<StdRng>,
}

impl Shared {
    /// Arms a timer that wakes `slot` at `deadline`.
    pub(crate) fn register_timer(&self, deadline: Instant, slot: Arc<TimerSlot>) {
        self.timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(deadline, slot);
    }

    pub(crate) fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Wakes the future passed to [`Runtime::block_on`].
///
/// The root future is not a task: it lives on the stack of `block_on`, so
/// it only needs a flag and a way to unpark the driver.
struct RootWaker {
    woken: AtomicBool,
    scheduler: Arc<Scheduler>,
}

impl RootWaker {
    fn take(&self) -> bool {
        self.woken.swap(false, Ordering::AcqRel)
    }
}

impl Wake for RootWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.woken.store(true, Ordering::Release);
        self.scheduler.notify();
    }
}

/// The main runtime handle.
///
/// `Runtime` is responsible for:
/// - spawning tasks onto its run queue,
/// - driving the root future and every task on the calling thread,
/// - firing timers and parking the thread until the next deadline,
/// - routing events to the configured [`Sink`].
///
/// Built with [`RuntimeBuilder`](crate::RuntimeBuilder).
pub struct Runtime {
    shared: Arc<Shared>,
}

impl Runtime {
    pub(crate) fn new(sink: Arc<dyn Sink>, rng: StdRng) -> Self {
        let shared = Shared {
            scheduler: Arc::new(Scheduler::new()),
            timers: Mutex::new(TimerQueue::new()),
            sink,
            rng: Mutex::new(rng),
        };

        Self {
            shared: Arc::new(shared),
        }
    }

    /// Spawns a future onto the runtime.
    ///
    /// The task is queued immediately but only makes progress while some
    /// thread is inside [`block_on`](Self::block_on).
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let handle = runtime.spawn(async { 21 * 2 });
    /// assert_eq!(runtime.block_on(handle), 42);
    /// ```
    pub fn spawn<F, T>(&self, future: F) -> JoinHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        task::spawn_on(&self.shared.scheduler, future)
    }

    /// Runs a future to completion on the current thread.
    ///
    /// Each turn of the loop:
    /// 1. polls the root future if it was woken,
    /// 2. runs the tasks that were queued when the turn began,
    /// 3. fires every expired timer,
    /// 4. parks until the next deadline when nothing is runnable.
    ///
    /// The future does not need to be `Send`: it never leaves this thread.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let result = runtime.block_on(async { 42 });
    /// assert_eq!(result, 42);
    /// ```
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        enter_context(self.shared.clone(), || {
            let mut future = pin!(future);

            let root = Arc::new(RootWaker {
                woken: AtomicBool::new(true),
                scheduler: self.shared.scheduler.clone(),
            });
            let waker = Waker::from(root.clone());
            let mut cx = Context::from_waker(&waker);

            loop {
                if root.take() {
                    if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
                        return output;
                    }
                }

                self.run_queued();

                let next_deadline = {
                    let mut timers = self
                        .shared
                        .timers
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner);
                    timers.fire_expired(Instant::now());
                    timers.next_deadline()
                };

                if root.woken.load(Ordering::Acquire) || self.shared.scheduler.len() > 0 {
                    continue;
                }

                let timeout = next_deadline
                    .map(|deadline| deadline.saturating_duration_since(Instant::now()));
                self.shared.scheduler.park(timeout);
            }
        })
    }

    /// Runs the tasks queued at the start of the call.
    ///
    /// Tasks requeued while running wait for the next turn, so the root
    /// future and the timers are never starved by a task that keeps
    /// waking itself.
    fn run_queued(&self) {
        let budget = self.shared.scheduler.len();

        for _ in 0..budget {
            let Some(task) = self.shared.scheduler.pop() else {
                break;
            };
            task.run();
        }
    }
}

impl Drop for Runtime {
    /// Releases queued tasks and armed timers.
    ///
    /// Tasks that never completed are dropped with their futures.
    fn drop(&mut self) {
        self.shared.scheduler.shutdown();

        self.shared
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
