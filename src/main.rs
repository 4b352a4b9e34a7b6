mod collectors;
mod config;
mod error;
mod export;
mod fanout;
mod http;
mod models;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobscrape=info")),
        )
        .init();

    let config = Config::parse();
    let collector = collectors::get_collector(&config)?;

    collectors::runner::run(&config, collector.as_ref()).await?;

    Ok(())
}
