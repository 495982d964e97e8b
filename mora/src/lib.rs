//! # Mora
//!
//! **Mora** is a small workbench for learning how asynchronous operations
//! compose. It pairs a set of exercises with the pieces they need:
//!
//! - a **latency decorator** ([`latency::Latency`]) that puts a simulated,
//!   non-blocking delay in front of any single-argument async operation,
//! - an **execution timer** ([`time::timed`]) that reports how long a
//!   composition took to settle,
//! - the **exercises** themselves ([`exercises`]): sequential, concurrent
//!   and chained compositions of `increment` and `double`,
//! - a **single-threaded runtime** with timers, spawning, a `join!` macro
//!   and `#[mora::main]` / `#[mora::test]` attributes to run them on.
//!
//! Progress is reported as structured [`events::Event`]s through a sink
//! installed on the runtime, `tracing` by default.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mora::exercises::{self, Operations};
//! use mora::time::timed;
//!
//! #[mora::main]
//! async fn main() -> mora::Result<()> {
//!     let ops = Operations::default();
//!
//!     // Both operations sleep one second, at the same time.
//!     let total = timed(exercises::concurrent(&ops, 5, 2)).await?;
//!     println!("{total}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`latency`]: Delay policies and the latency decorator
//! - [`time`]: Sleep, instrumentation and the execution timer
//! - [`tools`]: Future combinators (`and_then`, join branches)
//! - [`exercises`]: The composition exercises
//! - [`events`]: Events and sinks
//! - [`task`]: Spawning tasks and join handles

extern crate self as mora;

mod error;
mod runtime;

pub mod events;
pub mod exercises;
pub mod latency;
pub mod time;
pub mod tools;

pub use error::{Error, Result};
pub use runtime::builder::RuntimeBuilder;
pub use runtime::core::Runtime;
pub use runtime::task;

pub use mora_macros::{join, main, test};

#[doc(hidden)]
pub mod __private {
    pub use crate::tools::MaybeDone;
}
