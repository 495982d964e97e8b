//! Sequential and concurrent composition exercises.
//!
//! Each exercise combines the same two wrapped operations, `increment`
//! (`n + 1`) and `double` (`n * 2`), in a different way:
//!
//! | exercise                   | shape                             | inputs | result |
//! |----------------------------|-----------------------------------|--------|--------|
//! | [`sequential_dependent`]   | `a = inc(n)`, `b = dbl(a)`, `a+b` | 4      | 15     |
//! | [`sequential_independent`] | `inc(x)` then `dbl(y)`, summed    | 5, 2   | 10     |
//! | [`concurrent`]             | `inc(x)` and `dbl(y)` joined      | 5, 2   | 10     |
//! | [`chained`]                | `inc(n)` continued by `dbl`       | 4      | 10     |
//!
//! The sequential versions pay both delays one after the other; the
//! concurrent one pays only the longer of the two.

use crate::error::{Error, Result};
use crate::join;
use crate::latency::{Delay, Latency};
use crate::tools::and_then;

use std::fmt;
use std::future::{Future, Ready, ready};
use std::pin::Pin;

/// A wrapped `i64 -> i64` operation.
pub type Operation = Latency<fn(i64) -> Ready<Result<i64>>>;

fn increment(n: i64) -> Ready<Result<i64>> {
    ready(n.checked_add(1).ok_or(Error::Overflow {
        operation: "increment",
        left: n,
        right: 1,
    }))
}

fn double(n: i64) -> Ready<Result<i64>> {
    ready(n.checked_mul(2).ok_or(Error::Overflow {
        operation: "double",
        left: n,
        right: 2,
    }))
}

fn sum(left: i64, right: i64) -> Result<i64> {
    left.checked_add(right).ok_or(Error::Overflow {
        operation: "sum",
        left,
        right,
    })
}

/// The two operations every exercise composes.
#[derive(Debug, Clone)]
pub struct Operations {
    pub increment: Operation,
    pub double: Operation,
}

impl Operations {
    /// Both operations wait for `delay` before running.
    pub fn new(delay: Delay) -> Self {
        Self::with_delays(delay, delay)
    }

    /// Gives each operation its own delay.
    pub fn with_delays(increment_delay: Delay, double_delay: Delay) -> Self {
        Self {
            increment: Latency::new("increment", increment_delay, increment as fn(i64) -> _),
            double: Latency::new("double", double_delay, double as fn(i64) -> _),
        }
    }
}

impl Default for Operations {
    /// One second of latency per call.
    fn default() -> Self {
        Self::new(Delay::default())
    }
}

/// Feeds the result of `increment` into `double` and adds both results.
///
/// `double` is not started before `increment` has settled.
pub async fn sequential_dependent(ops: &Operations, input: i64) -> Result<i64> {
    let incremented = ops.increment.call(input).await?;
    let doubled = ops.double.call(incremented).await?;

    sum(doubled, incremented)
}

/// Runs `increment(x)` to completion, then `double(y)`, and adds them.
pub async fn sequential_independent(ops: &Operations, x: i64, y: i64) -> Result<i64> {
    let incremented = ops.increment.call(x).await?;
    let doubled = ops.double.call(y).await?;

    sum(incremented, doubled)
}

/// Starts `increment(x)` and `double(y)` together, waits for both to
/// settle, and adds them.
///
/// Both delays overlap, so this takes as long as the slower operation.
/// When both fail, the error of `increment` is returned.
pub async fn concurrent(ops: &Operations, x: i64, y: i64) -> Result<i64> {
    let (incremented, doubled) = join!(ops.increment.call(x), ops.double.call(y));

    sum(incremented?, doubled?)
}

/// Attaches `double` as a continuation of `increment(input)`.
///
/// The chain is returned without being awaited here; the caller awaits
/// the whole thing once.
pub fn chained(ops: &Operations, input: i64) -> impl Future<Output = Result<i64>> + Send + use<> {
    let double = ops.double.clone();

    and_then(ops.increment.call(input), move |incremented| {
        double.call(incremented)
    })
}

/// The exercises with the inputs they are written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exercise {
    SequentialDependent,
    SequentialIndependent,
    Concurrent,
    Chained,
}

impl Exercise {
    pub const ALL: [Exercise; 4] = [
        Exercise::SequentialDependent,
        Exercise::SequentialIndependent,
        Exercise::Concurrent,
        Exercise::Chained,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Exercise::SequentialDependent => "sequential_dependent",
            Exercise::SequentialIndependent => "sequential_independent",
            Exercise::Concurrent => "concurrent",
            Exercise::Chained => "chained",
        }
    }

    /// Result the exercise produces with its reference inputs.
    pub fn expected(self) -> i64 {
        match self {
            Exercise::SequentialDependent => 15,
            Exercise::SequentialIndependent | Exercise::Concurrent | Exercise::Chained => 10,
        }
    }

    /// Runs the exercise with its reference inputs.
    pub fn run<'a>(self, ops: &'a Operations) -> Pin<Box<dyn Future<Output = Result<i64>> + Send + 'a>> {
        match self {
            Exercise::SequentialDependent => Box::pin(sequential_dependent(ops, 4)),
            Exercise::SequentialIndependent => Box::pin(sequential_independent(ops, 5, 2)),
            Exercise::Concurrent => Box::pin(concurrent(ops, 5, 2)),
            Exercise::Chained => Box::pin(chained(ops, 4)),
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_checked() {
        assert_eq!(increment(4).into_inner(), Ok(5));
        assert_eq!(double(5).into_inner(), Ok(10));
        assert_eq!(
            increment(i64::MAX).into_inner(),
            Err(Error::Overflow {
                operation: "increment",
                left: i64::MAX,
                right: 1,
            })
        );
        assert!(double(i64::MIN).into_inner().is_err());
        assert!(sum(i64::MAX, 1).is_err());
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = Exercise::ALL.iter().map(|e| e.name()).collect();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), Exercise::ALL.len());
    }
}
