use reqwest::{Client, StatusCode};

use crate::error::ScrapeError;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

pub fn build_client() -> Result<Client, ScrapeError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|source| ScrapeError::Fetch {
            url: String::new(),
            source,
        })
}

/// GET `url` and return the body. Anything other than 200 is an error.
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let resp = client
        .get(url)
        .header("Accept", "text/html,application/xhtml+xml,*/*;q=0.8")
        .send()
        .await
        .map_err(|source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        })?;

    if resp.status() != StatusCode::OK {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }

    resp.text().await.map_err(|source| ScrapeError::Fetch {
        url: url.to_string(),
        source,
    })
}
