use crate::runtime::task::Task;

use std::sync::Arc;
use std::task::Wake;

/// Waking a task puts it back on the run queue of its runtime.
///
/// Every waker handed to the task's future holds an `Arc` to the task,
/// so a task stays alive as long as a timer or another future may still
/// wake it.
impl<T: Send + 'static> Wake for Task<T> {
    fn wake(self: Arc<Self>) {
        self.schedule();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.clone().schedule();
    }
}
