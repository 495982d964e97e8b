//! Spawned tasks.
//!
//! A task owns a `Send + 'static` future and is polled by the runtime
//! whenever its waker fires. [`spawn`] returns a [`JoinHandle`], itself a
//! future resolving to the task's output, which is how an operation that
//! is already in flight gets awaited later.

pub(crate) mod state;

mod core;
mod handle;
mod waker;

pub(crate) use self::core::{Runnable, Task, spawn_on};

pub use self::core::spawn;
pub use self::handle::JoinHandle;
