//! Single-threaded cooperative runtime.
//!
//! This module contains everything needed to drive the exercises:
//! - a run queue with a parker ([`scheduler`]),
//! - a deadline-ordered timer queue backing [`sleep`](crate::time::sleep),
//! - spawned tasks and their join handles,
//! - the thread-local context through which futures reach the runtime.
//!
//! All tasks run on the thread that calls
//! [`Runtime::block_on`](crate::Runtime::block_on). Suspension only
//! happens at `.await` points.

mod scheduler;
mod timer;

pub(crate) mod builder;
pub(crate) mod context;
pub(crate) mod core;

pub mod task;

pub(crate) use timer::TimerSlot;
