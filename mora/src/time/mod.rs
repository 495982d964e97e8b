//! Timers and execution timing.
//!
//! This module provides the time-related futures the exercises are built
//! on:
//! - [`sleep`] suspends without blocking the runtime thread,
//! - [`instrumented`] measures how long a future takes to settle,
//! - [`timed`] does the same and reports the duration as an
//!   [`Event::Finished`](crate::events::Event::Finished).

mod instrumented;
mod sleep;
mod timed;

#[doc(inline)]
pub use instrumented::{Instrumented, instrumented};

#[doc(inline)]
pub use sleep::{Sleep, sleep};

#[doc(inline)]
pub use timed::{Timed, timed};
