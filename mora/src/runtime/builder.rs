use super::core::Runtime;
use crate::events::{Sink, TracingSink};

use rand::SeedableRng;
use rand::rngs::StdRng;

use std::sync::Arc;

/// Builder for configuring and creating a runtime.
///
/// # Examples
///
/// ```rust,ignore
/// let sink = MemorySink::new();
/// let runtime = RuntimeBuilder::new()
///     .sink(Arc::new(sink.clone()))
///     .seed(7)
///     .build();
/// ```
pub struct RuntimeBuilder {
    /// Receives every event emitted on the runtime.
    sink: Arc<dyn Sink>,

    /// Seed for random delays; `None` draws one from the OS.
    seed: Option<u64>,
}

impl RuntimeBuilder {
    /// Creates a builder that logs through `tracing` and seeds random
    /// delays from OS entropy.
    pub fn new() -> Self {
        Self {
            sink: Arc::new(TracingSink),
            seed: None,
        }
    }

    /// Sets the sink events are delivered to.
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = sink;
        self
    }

    /// Fixes the sequence of random delays drawn on this runtime.
    ///
    /// Two runtimes built with the same seed resolve the same sequence of
    /// [`Delay::Random`](crate::latency::Delay::Random) durations.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Runtime {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Runtime::new(self.sink, rng)
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
