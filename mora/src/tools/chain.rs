use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Runs `continuation` on the success value of `future` and awaits the
/// future it returns.
///
/// An `Err` from `future` settles the chain immediately; the continuation
/// is never called. Nothing is polled until the returned future is.
///
/// # Examples
///
/// ```rust,ignore
/// let ten = and_then(increment.call(4), move |five| double.call(five)).await?;
/// ```
pub fn and_then<Fut, G, Next, T, U, E>(future: Fut, continuation: G) -> AndThen<Fut, G, Next>
where
    Fut: Future<Output = Result<T, E>>,
    G: FnOnce(T) -> Next + Unpin,
    Next: Future<Output = Result<U, E>>,
{
    AndThen {
        state: State::First {
            future: Box::pin(future),
            continuation: Some(continuation),
        },
    }
}

enum State<Fut, G, Next> {
    First {
        future: Pin<Box<Fut>>,
        continuation: Option<G>,
    },
    Second(Pin<Box<Next>>),
    Done,
}

/// Future returned by [`and_then`].
#[must_use = "futures do nothing unless polled"]
pub struct AndThen<Fut, G, Next> {
    state: State<Fut, G, Next>,
}

impl<Fut, G, Next, T, U, E> Future for AndThen<Fut, G, Next>
where
    Fut: Future<Output = Result<T, E>>,
    G: FnOnce(T) -> Next + Unpin,
    Next: Future<Output = Result<U, E>>,
{
    type Output = Result<U, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        loop {
            match &mut this.state {
                State::First {
                    future,
                    continuation,
                } => {
                    let value = match future.as_mut().poll(cx) {
                        Poll::Pending => return Poll::Pending,
                        Poll::Ready(Err(err)) => {
                            this.state = State::Done;
                            return Poll::Ready(Err(err));
                        }
                        Poll::Ready(Ok(value)) => value,
                    };

                    let Some(continuation) = continuation.take() else {
                        unreachable!("continuation is present until the first future settles");
                    };
                    this.state = State::Second(Box::pin(continuation(value)));
                }
                State::Second(next) => {
                    let output = match next.as_mut().poll(cx) {
                        Poll::Pending => return Poll::Pending,
                        Poll::Ready(output) => output,
                    };

                    this.state = State::Done;
                    return Poll::Ready(output);
                }
                State::Done => panic!("AndThen polled after completion"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::future::ready;
    use std::task::Waker;

    fn poll_now<F: Future>(future: F) -> Poll<F::Output> {
        let mut cx = Context::from_waker(Waker::noop());
        std::pin::pin!(future).poll(&mut cx)
    }

    #[test]
    fn feeds_the_settled_value_to_the_continuation() {
        let chained = and_then(ready(Ok::<_, ()>(4)), |n| ready(Ok(n * 2)));

        assert_eq!(poll_now(chained), Poll::Ready(Ok(8)));
    }

    #[test]
    fn error_skips_the_continuation() {
        let mut called = false;
        let chained = and_then(ready(Err::<i32, _>("boom")), |n| {
            called = true;
            ready(Ok(n))
        });

        assert_eq!(poll_now(chained), Poll::Ready(Err("boom")));
        assert!(!called);
    }
}
