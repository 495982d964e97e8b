/// Task is idle and not scheduled.
///
/// It is waiting for its waker to fire.
pub(crate) const IDLE: usize = 0;

/// Task sits in the run queue.
pub(crate) const QUEUED: usize = 1;

/// Task is being polled.
pub(crate) const RUNNING: usize = 2;

/// The future returned `Poll::Ready`; the output waits in the task for
/// its join handle.
pub(crate) const COMPLETED: usize = 3;

/// Task was woken while being polled and must be queued again once the
/// current poll returns.
pub(crate) const NOTIFIED: usize = 4;
