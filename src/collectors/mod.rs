// Job source collectors and the run driver that exports their results.

pub mod indeed;
pub mod runner;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::ScrapeError;
use crate::models::job::Job;

/// A paginated job search source.
/// `collect` walks every result page behind `search_url` and returns all jobs
/// found, in no particular order.
#[async_trait]
pub trait JobCollector: Send + Sync {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    async fn collect(&self, search_url: &str) -> Result<Vec<Job>, ScrapeError>;
}

pub fn get_collector(config: &Config) -> Result<Box<dyn JobCollector>, ScrapeError> {
    Ok(Box::new(indeed::Indeed::new(config.page_size, config.concurrency)?))
}
