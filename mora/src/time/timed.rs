use super::instrumented::{Instrumented, instrumented};
use crate::events::{self, Event};

use pin_project_lite::pin_project;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Awaits `future` and reports how long it took.
///
/// Resolves to the future's own output, unchanged: an `Err` stays an
/// `Err`. The elapsed time is emitted as [`Event::Finished`] through the
/// current runtime's sink whatever the output is.
///
/// # Examples
///
/// ```rust,ignore
/// let ops = Operations::default();
/// let total = timed(exercises::concurrent(&ops, 5, 2)).await?;
/// ```
pub fn timed<F: Future>(future: F) -> Timed<F> {
    Timed {
        inner: instrumented(future),
    }
}

pin_project! {
    /// Future returned by [`timed`].
    #[must_use = "futures do nothing unless polled"]
    pub struct Timed<F> {
        #[pin]
        inner: Instrumented<F>,
    }
}

impl<F: Future> Future for Timed<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let (output, elapsed) = match self.project().inner.poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(settled) => settled,
        };

        events::emit(Event::Finished { elapsed });
        Poll::Ready(output)
    }
}
