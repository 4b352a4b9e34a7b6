use std::path::Path;
use std::sync::Arc;

use crate::error::ScrapeError;
use crate::fanout::gather;
use crate::models::job::{CSV_HEADER, Job, JobRow};

/// Convert jobs to rows and write them, header first, to `path`.
/// Returns the number of data rows written.
pub async fn write_jobs(
    path: &Path,
    jobs: Vec<Job>,
    detail_url_prefix: &str,
    concurrency: usize,
) -> Result<usize, ScrapeError> {
    let prefix: Arc<str> = Arc::from(detail_url_prefix);
    let rows = gather(jobs, concurrency, |job| {
        let prefix = Arc::clone(&prefix);
        async move { Ok(JobRow::from_job(&prefix, job)) }
    })
    .await?;

    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || write_rows(&path, &rows)).await?
}

/// Truncates `path`. A failure part way through leaves whatever was written.
pub fn write_rows(path: &Path, rows: &[JobRow]) -> Result<usize, ScrapeError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(rows.len())
}
