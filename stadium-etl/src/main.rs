//! Binary entry point: runs the stadium ETL pipeline once.
//!
//! An optional argument names a JSON config file; otherwise defaults are
//! used. The run is manual-trigger only, matching the scheduler entry the
//! pipeline mirrors.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stadium_etl::config::EtlConfig;
use stadium_etl::fetch::HttpFetcher;
use stadium_etl::pipeline::EtlPipeline;

fn load_config() -> Result<EtlConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing config file {path}"))
        }
        None => Ok(EtlConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating output directory {}", config.output_dir.display()))?;

    let fetcher = Arc::new(HttpFetcher::new(&config)?);
    let pipeline = EtlPipeline::new(fetcher);

    let run = pipeline.run(config).await?;
    info!(run_id = %run.run_id, "done");
    Ok(())
}
