use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::Waker;
use std::time::Instant;

/// State shared between a [`Sleep`](crate::time::Sleep) and its queue entry.
///
/// The sleep refreshes the waker whenever it is polled from a different
/// task and sets `cancelled` when dropped, so a fired entry never wakes an
/// abandoned future.
pub(crate) struct TimerSlot {
    waker: Mutex<Waker>,
    cancelled: AtomicBool,
}

impl TimerSlot {
    pub(crate) fn new(waker: Waker) -> Self {
        Self {
            waker: Mutex::new(waker),
            cancelled: AtomicBool::new(false),
        }
    }

    pub(crate) fn update_waker(&self, waker: &Waker) {
        let mut current = self.waker.lock().unwrap_or_else(PoisonError::into_inner);
        if !current.will_wake(waker) {
            *current = waker.clone();
        }
    }

    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, AtomicOrdering::Release);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(AtomicOrdering::Acquire)
    }

    fn wake(&self) {
        self.waker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .wake_by_ref();
    }
}

/// An entry in the timer queue.
struct TimerEntry {
    deadline: Instant,

    /// Insertion order, so timers sharing a deadline fire first-in first-out.
    seq: u64,

    slot: Arc<TimerSlot>,
}

impl Eq for TimerEntry {}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Ord for TimerEntry {
    /// Reversed so that `BinaryHeap` pops the earliest deadline first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending timers of a runtime, earliest deadline on top.
#[derive(Default)]
pub(crate) struct TimerQueue {
    heap: BinaryHeap<TimerEntry>,
    next_seq: u64,
}

impl TimerQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, deadline: Instant, slot: Arc<TimerSlot>) {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.heap.push(TimerEntry {
            deadline,
            seq,
            slot,
        });
    }

    /// Earliest deadline among timers that are still armed.
    ///
    /// Cancelled entries found on top of the heap are discarded.
    pub(crate) fn next_deadline(&mut self) -> Option<Instant> {
        while let Some(entry) = self.heap.peek() {
            if !entry.slot.is_cancelled() {
                return Some(entry.deadline);
            }
            self.heap.pop();
        }

        None
    }

    /// Wakes every armed timer whose deadline is at or before `now`.
    ///
    /// Returns how many wakers were invoked.
    pub(crate) fn fire_expired(&mut self, now: Instant) -> usize {
        let mut fired = 0;

        while self.heap.peek().is_some_and(|entry| entry.deadline <= now) {
            let Some(entry) = self.heap.pop() else {
                break;
            };

            if entry.slot.is_cancelled() {
                continue;
            }

            entry.slot.wake();
            fired += 1;
        }

        fired
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.heap.len()
    }
}
