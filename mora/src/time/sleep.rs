use crate::runtime::TimerSlot;
use crate::runtime::context;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Creates a future that completes after the given duration.
///
/// Unlike a busy wait, sleeping only suspends the current future: other
/// tasks and other branches of a `join!` keep running meanwhile.
///
/// # Panics
///
/// Panics if polled outside of a running runtime while the deadline is
/// still in the future.
///
/// # Examples
///
/// ```rust,ignore
/// use std::time::Duration;
///
/// sleep(Duration::from_millis(10)).await;
/// ```
pub fn sleep(duration: Duration) -> Sleep {
    Sleep::new(duration)
}

/// A future that completes once a specific deadline is reached.
///
/// The timer is registered with the runtime on the first poll that finds
/// the deadline in the future. Dropping the future disarms the timer.
pub struct Sleep {
    /// Absolute point in time when the sleep completes.
    deadline: Instant,

    /// Timer shared with the runtime; `None` until registered.
    slot: Option<Arc<TimerSlot>>,
}

impl Sleep {
    /// Durations too large to add to the current instant are clamped to
    /// roughly thirty years from now.
    pub(crate) fn new(duration: Duration) -> Self {
        let now = Instant::now();
        let deadline = now
            .checked_add(duration)
            .unwrap_or_else(|| now + FAR_FUTURE);

        Self {
            deadline,
            slot: None,
        }
    }

    /// The instant at which this sleep completes.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns `true` once the deadline has passed.
    pub fn is_elapsed(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

impl Future for Sleep {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if this.is_elapsed() {
            return Poll::Ready(());
        }

        match &this.slot {
            Some(slot) => slot.update_waker(cx.waker()),
            None => {
                let slot = Arc::new(TimerSlot::new(cx.waker().clone()));
                context::expect_current("time::sleep").register_timer(this.deadline, slot.clone());
                this.slot = Some(slot);
            }
        }

        Poll::Pending
    }
}

impl Drop for Sleep {
    fn drop(&mut self) {
        if let Some(slot) = &self.slot {
            slot.cancel();
        }
    }
}
