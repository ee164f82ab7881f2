//! mockcomm — Expected vs. measured composition of a ZymoResearch mock community.
//! Entry point for the command-line binary. Takes no arguments.

mod config;
mod pipeline;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mockcomm=info,info")),
        )
        .init();

    info!("🧫 ZymoResearch Mock Community Composition Analysis");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::load()?;

    match pipeline::run(&config).await {
        Ok(comparison) => {
            info!(
                "✅ Compared {} species across {} phyla.",
                comparison.species.len(),
                comparison.phyla.len()
            );
            Ok(())
        }
        // Missing inputs and an unreadable measured layout end the run
        // without output but are not reported through the exit status.
        Err(e) if e.is_recoverable() => {
            error!("{e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
