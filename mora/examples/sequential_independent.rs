//! Example: await `increment(5)`, then `double(2)`, add both (prints 10, about two seconds)

use mora::exercises::{self, Operations};
use mora::time::timed;
use tracing_subscriber::EnvFilter;

#[mora::main]
async fn main() -> mora::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let ops = Operations::default();

    let result = timed(exercises::sequential_independent(&ops, 5, 2)).await?;
    println!("{result}");

    Ok(())
}
