//! Example: chain `double` onto `increment(4)` without an intermediate await (prints 10)

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

    // Built here, awaited once below.
    let chain = exercises::chained(&ops, 4);
    let result = timed(chain).await?;
    println!("{result}");

    Ok(())
}
