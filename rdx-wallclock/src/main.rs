use anyhow::Result;
use tracing_subscriber::EnvFilter;
use wallclock::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. The clock takes no arguments, files, or environment; run on defaults.
    let config = WallclockConfig::default();

    // 2. Initialize structured logging on stderr; stdout belongs to the clock line.
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // 3. Create the engine and run it until Ctrl+C.
    let engine = ClockEngine::new(config);
    engine.run().await?;

    Ok(())
}
