use crate::runtime::core::Shared;

use std::cell::RefCell;
use std::sync::Arc;

thread_local! {
    /// The runtime driving the current thread, if any.
    ///
    /// Installed for the duration of [`Runtime::block_on`](crate::Runtime::block_on)
    /// so that timers, spawning, random delays and event emission can reach
    /// the runtime without handles being threaded through every call.
    static CURRENT: RefCell<Option<Arc<Shared>>> = const { RefCell::new(None) };
}

/// Restores the previously installed runtime when dropped, including
/// when the closure passed to [`enter_context`] unwinds.
struct Restore(Option<Arc<Shared>>);

impl Drop for Restore {
    fn drop(&mut self) {
        let previous = self.0.take();
        CURRENT.with(|cell| *cell.borrow_mut() = previous);
    }
}

/// Runs `f` with `shared` installed as the current runtime.
pub(crate) fn enter_context<R>(shared: Arc<Shared>, f: impl FnOnce() -> R) -> R {
    let previous = CURRENT.with(|cell| cell.replace(Some(shared)));
    let _restore = Restore(previous);

    f()
}

/// The runtime installed on this thread, if any.
pub(crate) fn current() -> Option<Arc<Shared>> {
    CURRENT.with(|cell| cell.borrow().clone())
}

/// Like [`current`], for primitives that cannot work without a runtime.
///
/// # Panics
///
/// Panics with a message naming `what` when no runtime is installed.
pub(crate) fn expect_current(what: &str) -> Arc<Shared> {
    current().unwrap_or_else(|| panic!("{what} must be used within a mora runtime"))
}
