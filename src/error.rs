use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed with status: {status}")]
    Status { url: String, status: StatusCode },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Failed to write CSV: {0}")]
    Write(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Worker task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for ScrapeError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            ScrapeError::Task(format!("worker panicked: {err}"))
        } else {
            ScrapeError::Task(err.to_string())
        }
    }
}
