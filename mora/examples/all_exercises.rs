//! Example: run every exercise with random delays of up to three seconds

use mora::exercises::{Exercise, Operations};
use mora::latency::Delay;
use mora::time::instrumented;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[mora::main]
async fn main() -> mora::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let ops = Operations::new(Delay::random(Duration::from_secs(3)));

    for exercise in Exercise::ALL {
        let (result, elapsed) = instrumented(exercise.run(&ops)).await;
        println!("{exercise:<24} {:>4} in {elapsed:.2?}", result?);
    }

    Ok(())
}
