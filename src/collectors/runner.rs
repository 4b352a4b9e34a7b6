use crate::collectors::JobCollector;
use crate::config::Config;
use crate::error::ScrapeError;
use crate::export;

/// Collect every job for the configured term and export them.
/// Nothing is written unless collection succeeds in full.
pub async fn run(config: &Config, collector: &dyn JobCollector) -> Result<usize, ScrapeError> {
    let search_url = config.search_url();
    tracing::info!(
        "Collecting '{}' from {search_url} via '{}'",
        config.term,
        collector.name()
    );

    let jobs = collector.collect(&search_url).await?;
    let prefix = config.resolved_detail_prefix();
    let written = export::write_jobs(&config.output, jobs, &prefix, config.concurrency).await?;

    tracing::info!("Extracted {written} jobs to {}", config.output.display());
    Ok(written)
}
