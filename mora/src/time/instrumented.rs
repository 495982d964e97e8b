use pin_project_lite::pin_project;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

/// Wraps a future and measures the time it takes to complete.
///
/// The returned future resolves to the output of the wrapped future
/// together with the time elapsed since it was first polled.
///
/// # Examples
///
/// ```rust,ignore
/// let (value, elapsed) = instrumented(async { 42 }).await;
/// println!("Completed in {:?}", elapsed);
/// ```
pub fn instrumented<F: Future>(future: F) -> Instrumented<F> {
    Instrumented {
        future,
        start: None,
    }
}

pin_project! {
    /// A future that measures the execution time of another future.
    ///
    /// Timing starts on the **first poll**, which is when the wrapped work
    /// actually begins. Dropping it early discards the measurement.
    #[must_use = "futures do nothing unless polled"]
    pub struct Instrumented<F> {
        #[pin]
        future: F,
        start: Option<Instant>,
    }
}

impl<F: Future> Future for Instrumented<F> {
    type Output = (F::Output, Duration);

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let start = *this.start.get_or_insert_with(Instant::now);

        match this.future.poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(output) => Poll::Ready((output, start.elapsed())),
        }
    }
}
