mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commute_core::app::{CommuteCollector, plan_commutes};
use commute_core::impls::{GoogleDistanceMatrix, JsonFileLocationStore, JsonLinesSampleStore};
use commute_core::ports::{Clock, SystemClock};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::CollectorConfig;

/// Collect commute times between registered locations.
///
/// Configuration comes from `COMMUTE_*` environment variables.
#[derive(Debug, Parser)]
#[command(name = "commute-collector", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one collection pass (default)
    Run {
        /// Print the run report as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Print the pairs a run would query right now, without calling out
    Plan,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match CollectorConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("Configuration: {:?}", config);

    let result = match cli.command.unwrap_or(Command::Run { json: false }) {
        Command::Run { json } => run(&config, json).await,
        Command::Plan => plan(&config).await,
    };

    if let Err(e) = result {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(config: &CollectorConfig, json: bool) -> Result<()> {
    let matrix = GoogleDistanceMatrix::new(
        config.endpoint.clone(),
        config.api_key()?,
        config.units,
        config.request_timeout(),
    )
    .context("failed to build distance matrix client")?;

    // samples file is created on the first write
    let collector = CommuteCollector::new(
        Arc::new(JsonFileLocationStore::new(&config.locations_path)),
        Arc::new(matrix),
        Arc::new(JsonLinesSampleStore::new(&config.samples_path)),
        config.settings()?,
    );

    let report = collector.run().await?;
    if !report.is_clean() {
        warn!(
            fetch_failures = report.fetch_failures,
            write_failures = report.write_failures,
            "run finished with failures"
        );
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

async fn plan(config: &CollectorConfig) -> Result<()> {
    let locations = JsonFileLocationStore::new(&config.locations_path);
    let plan = plan_commutes(&locations, SystemClock.now(), config.time_zone()?).await?;
    info!(
        day_part = %plan.day_part,
        pairs = plan.len(),
        "planned commute pairs"
    );
    for pair in plan.pairs() {
        println!("{}\t{}", pair.label(), pair.key());
    }
    Ok(())
}
