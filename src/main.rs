//! orbiter - headless host for the fixed-spin entity behaviour
//!
//! Spawns one entity, attaches an orientation updater and ticks it until the
//! tick limit is reached or the behaviour navigates away.

mod cli;
mod config;
mod event_log;
mod report;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use config::SessionConfig;
use report::ReportSink;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // The filter comes from the config, so load it under a temporary WARN
    // subscriber to keep its fallback warnings visible.
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .finish();
    let config = tracing::subscriber::with_default(bootstrap, || match args.config.as_deref() {
        Some(path) => SessionConfig::load_from_path(path),
        None => SessionConfig::load(),
    });
    let config = args.apply_overrides(config);

    // RUST_LOG, then --log-filter, then the config's log_filter, then WARN
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.effective_log_filter())),
        )
        .init();

    info!("Starting orbiter v{}", env!("CARGO_PKG_VERSION"));

    let report = session::run(&config)?;

    if let Some(path) = &config.report {
        ReportSink::create(path)
            .and_then(|sink| sink.write(&report))
            .with_context(|| format!("failed to write run report to {}", path.display()))?;
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
