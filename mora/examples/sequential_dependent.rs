//! Example: await `increment(4)`, feed it to `double`, add both (prints 15)

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

    let result = timed(exercises::sequential_dependent(&ops, 4)).await?;
    println!("{result}");

    Ok(())
}
