use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};

/// One branch of a [`join!`](crate::join).
///
/// Holds the future until it settles, then its output until the join
/// collects every output at once.
pub enum MaybeDone<F: Future> {
    Pending(Pin<Box<F>>),
    Done(F::Output),
    Taken,
}

impl<F: Future> MaybeDone<F> {
    pub fn new(future: F) -> Self {
        MaybeDone::Pending(Box::pin(future))
    }

    /// Polls the future if it has not settled yet.
    ///
    /// Returns `true` once an output is available.
    pub fn poll_settled(&mut self, cx: &mut Context<'_>) -> bool {
        if let MaybeDone::Pending(future) = self {
            match future.as_mut().poll(cx) {
                Poll::Ready(output) => *self = MaybeDone::Done(output),
                Poll::Pending => return false,
            }
        }

        true
    }

    /// Moves the output out.
    ///
    /// # Panics
    ///
    /// Panics unless [`poll_settled`](Self::poll_settled) returned `true`
    /// and the output has not been taken yet.
    pub fn take_output(&mut self) -> F::Output {
        match mem::replace(self, MaybeDone::Taken) {
            MaybeDone::Done(output) => output,
            MaybeDone::Pending(_) => panic!("MaybeDone::take_output called before the future settled"),
            MaybeDone::Taken => panic!("MaybeDone::take_output called twice"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::future::{pending, ready};
    use std::task::Waker;

    #[test]
    fn ready_future_settles_on_first_poll() {
        let mut cx = Context::from_waker(Waker::noop());
        let mut branch = MaybeDone::new(ready(7));

        assert!(branch.poll_settled(&mut cx));
        assert!(branch.poll_settled(&mut cx));
        assert_eq!(branch.take_output(), 7);
    }

    #[test]
    fn pending_future_stays_pending() {
        let mut cx = Context::from_waker(Waker::noop());
        let mut branch = MaybeDone::new(pending::<u8>());

        assert!(!branch.poll_settled(&mut cx));
        assert!(matches!(branch, MaybeDone::Pending(_)));
    }

    #[test]
    #[should_panic(expected = "called twice")]
    fn output_is_taken_once() {
        let mut cx = Context::from_waker(Waker::noop());
        let mut branch = MaybeDone::new(ready(()));

        branch.poll_settled(&mut cx);
        branch.take_output();
        branch.take_output();
    }
}
