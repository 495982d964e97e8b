use crate::runtime::task::Task;
use crate::runtime::task::state::COMPLETED;

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::Ordering;
use std::sync::{Arc, PoisonError};
use std::task::{Context, Poll};

/// A handle to a spawned task.
///
/// Resolves to the task's output once it has completed. Dropping the
/// handle does **not** cancel the task; it only discards the output.
pub struct JoinHandle<T> {
    pub(crate) task: Arc<Task<T>>,
}

impl<T> JoinHandle<T> {
    /// Returns `true` once the task's future has completed.
    pub fn is_finished(&self) -> bool {
        self.task.state.load(Ordering::Acquire) == COMPLETED
    }

    fn take_output(&self) -> Option<T> {
        if !self.is_finished() {
            return None;
        }

        let output = self
            .task
            .output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        Some(output.expect("JoinHandle polled after its output was taken"))
    }
}

impl<T> Future for JoinHandle<T> {
    type Output = T;

    /// The waker is registered **before** re-checking the task state, so
    /// a completion between the two checks still wakes this handle.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        if let Some(output) = self.take_output() {
            return Poll::Ready(output);
        }

        self.task
            .waiters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(cx.waker().clone());

        match self.take_output() {
            Some(output) => Poll::Ready(output),
            None => Poll::Pending,
        }
    }
}
