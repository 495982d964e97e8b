//! Simulated latency in front of asynchronous operations.
//!
//! [`Latency`] wraps a single-argument operation returning a future. Every
//! call first announces itself, waits for the configured [`Delay`] on a
//! runtime timer, announces the end of the wait, and only then runs the
//! operation. The operation's output, including any error, is passed
//! through untouched.
//!
//! ```rust,ignore
//! let increment = Latency::new("increment", Delay::fixed(Duration::from_secs(1)), |n: i64| {
//!     std::future::ready(n + 1)
//! });
//!
//! assert_eq!(increment.call(4).await, 5);
//! ```

use crate::events::{self, Event};
use crate::runtime::context;
use crate::time::sleep;

use rand::Rng;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// How long a wrapped operation waits before running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delay {
    /// Always the same duration.
    Fixed(Duration),

    /// Uniformly distributed in `[0, max)`, drawn from the runtime's
    /// random number generator on every call. A zero `max` means no wait.
    Random { max: Duration },
}

impl Delay {
    pub const fn fixed(duration: Duration) -> Self {
        Delay::Fixed(duration)
    }

    pub const fn random(max: Duration) -> Self {
        Delay::Random { max }
    }

    /// No delay at all.
    pub const fn none() -> Self {
        Delay::Fixed(Duration::ZERO)
    }

    /// The longest wait this policy can produce.
    pub fn upper_bound(&self) -> Duration {
        match *self {
            Delay::Fixed(duration) => duration,
            Delay::Random { max } => max,
        }
    }

    /// Picks the duration of one wait.
    ///
    /// Random delays are drawn from the current runtime's generator, so a
    /// seeded runtime yields a reproducible sequence. Outside a runtime
    /// the thread-local generator is used.
    pub fn resolve(&self) -> Duration {
        match *self {
            Delay::Fixed(duration) => duration,
            Delay::Random { max } if max.is_zero() => Duration::ZERO,
            Delay::Random { max } => match context::current() {
                Some(shared) => shared.rng().gen_range(Duration::ZERO..max),
                None => rand::thread_rng().gen_range(Duration::ZERO..max),
            },
        }
    }
}

impl Default for Delay {
    /// One second, fixed.
    fn default() -> Self {
        Delay::Fixed(Duration::from_secs(1))
    }
}

/// A named operation whose every call is preceded by a simulated delay.
///
/// Cloning is cheap: the operation itself is shared.
pub struct Latency<F> {
    name: Arc<str>,
    delay: Delay,
    operation: Arc<F>,
}

impl<F> Clone for Latency<F> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            delay: self.delay,
            operation: self.operation.clone(),
        }
    }
}

impl<F> Latency<F> {
    /// Wraps `operation`.
    ///
    /// `name` identifies the operation in emitted events.
    pub fn new(name: impl Into<Arc<str>>, delay: Delay, operation: F) -> Self {
        Self {
            name: name.into(),
            delay,
            operation: Arc::new(operation),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn delay(&self) -> Delay {
        self.delay
    }

    /// Returns a copy of this operation using a different delay.
    pub fn with_delay(&self, delay: Delay) -> Self {
        Self {
            delay,
            ..self.clone()
        }
    }

    /// Invokes the operation behind its simulated latency.
    ///
    /// When first polled, the returned future:
    /// 1. emits [`Event::Started`],
    /// 2. resolves the delay, emits [`Event::Sleeping`] and sleeps,
    /// 3. emits [`Event::Ended`],
    /// 4. calls the operation with `input` and awaits its result.
    ///
    /// Nothing happens before the first poll. Two calls joined together
    /// therefore both start, and sleep, at the same time.
    pub fn call<A, Fut>(&self, input: A) -> impl Future<Output = Fut::Output> + Send + use<F, A, Fut>
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        A: Send + 'static,
        Fut: Future + Send + 'static,
    {
        let name = self.name.clone();
        let delay = self.delay;
        let operation = self.operation.clone();

        async move {
            events::emit(Event::Started {
                operation: name.clone(),
            });

            let delay = delay.resolve();
            events::emit(Event::Sleeping {
                operation: name.clone(),
                delay,
            });
            sleep(delay).await;

            events::emit(Event::Ended { operation: name });

            operation(input).await
        }
    }
}

impl<F> std::fmt::Debug for Latency<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Latency")
            .field("name", &self.name)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_delay_resolves_to_itself() {
        let delay = Delay::fixed(Duration::from_millis(250));

        assert_eq!(delay.resolve(), Duration::from_millis(250));
        assert_eq!(delay.upper_bound(), Duration::from_millis(250));
    }

    #[test]
    fn zero_random_bound_means_no_wait() {
        assert_eq!(Delay::random(Duration::ZERO).resolve(), Duration::ZERO);
    }

    #[test]
    fn random_delay_stays_below_its_bound() {
        let delay = Delay::random(Duration::from_millis(20));

        for _ in 0..200 {
            assert!(delay.resolve() < Duration::from_millis(20));
        }
    }

    #[test]
    fn default_is_one_second() {
        assert_eq!(Delay::default(), Delay::Fixed(Duration::from_secs(1)));
    }

    #[test]
    fn with_delay_keeps_the_name() {
        let op = Latency::new("noop", Delay::none(), |n: i64| std::future::ready(n));
        let slow = op.with_delay(Delay::fixed(Duration::from_secs(3)));

        assert_eq!(slow.name(), "noop");
        assert_eq!(slow.delay(), Delay::Fixed(Duration::from_secs(3)));
        assert_eq!(op.delay(), Delay::none());
    }
}
