//! Progress events and the sinks that receive them.
//!
//! Wrapped operations and the execution timer never print directly. They
//! hand an [`Event`] to the [`Sink`] installed on the current runtime
//! (see [`RuntimeBuilder::sink`](crate::RuntimeBuilder::sink)). The default
//! [`TracingSink`] turns events into `tracing` records; [`MemorySink`]
//! keeps them so tests can assert on what happened and in which order.

use crate::runtime::context;

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Something observable that happened while running an exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A wrapped operation was invoked.
    Started { operation: Arc<str> },

    /// A wrapped operation is about to wait for its simulated latency.
    Sleeping { operation: Arc<str>, delay: Duration },

    /// The simulated latency elapsed; the operation body runs next.
    Ended { operation: Arc<str> },

    /// A timed future settled after `elapsed`.
    Finished { elapsed: Duration },
}

impl Event {
    /// Name of the wrapped operation this event belongs to, if any.
    pub fn operation(&self) -> Option<&str> {
        match self {
            Event::Started { operation }
            | Event::Sleeping { operation, .. }
            | Event::Ended { operation } => Some(operation),
            Event::Finished { .. } => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Started { operation } => write!(f, "{operation} started"),
            Event::Sleeping { delay, .. } => write!(f, "sleeping {delay:?}"),
            Event::Ended { operation } => write!(f, "{operation} ended"),
            Event::Finished { elapsed } => {
                write!(f, "duration: {:.3} ms", elapsed.as_secs_f64() * 1000.0)
            }
        }
    }
}

/// Destination for [`Event`]s.
pub trait Sink: Send + Sync {
    fn emit(&self, event: Event);
}

/// Forwards events to `tracing` at `INFO` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn emit(&self, event: Event) {
        match &event {
            Event::Started { operation } | Event::Ended { operation } => {
                tracing::info!(operation = %operation, "{event}");
            }
            Event::Sleeping { operation, delay } => {
                tracing::info!(
                    operation = %operation,
                    delay_ms = delay.as_secs_f64() * 1000.0,
                    "{event}"
                );
            }
            Event::Finished { elapsed } => {
                tracing::info!(elapsed_ms = elapsed.as_secs_f64() * 1000.0, "{event}");
            }
        }
    }
}

/// Records events in memory.
///
/// Clones share the same buffer, so one clone can be installed on a
/// runtime while another is kept for inspection.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<Event>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event recorded so far, oldest first.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns every recorded event.
    pub fn drain(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Sink for MemorySink {
    fn emit(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Sends `event` to the current runtime's sink, or to [`TracingSink`]
/// when called outside a runtime.
pub(crate) fn emit(event: Event) {
    match context::current() {
        Some(shared) => shared.sink.emit(event),
        None => TracingSink.emit(event),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_sink_accepts_any_delay() {
        TracingSink.emit(Event::Sleeping {
            operation: "increment".into(),
            delay: Duration::MAX,
        });
        TracingSink.emit(Event::Finished {
            elapsed: Duration::MAX,
        });
    }

    #[test]
    fn memory_sink_clones_share_events() {
        let sink = MemorySink::new();
        let installed = sink.clone();

        installed.emit(Event::Ended {
            operation: "double".into(),
        });

        assert_eq!(sink.events().len(), 1);
        assert_eq!(sink.drain()[0].operation(), Some("double"));
        assert!(installed.events().is_empty());
    }
}
