use thiserror::Error;

/// Errors produced by the exercise operations.
///
/// Nothing in the runtime, the latency decorator or the timer recovers
/// from these; they travel unchanged to whoever awaits the composition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Checked `i64` arithmetic overflowed.
    #[error("{operation} of {left} and {right} overflows i64")]
    Overflow {
        operation: &'static str,
        left: i64,
        right: i64,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
