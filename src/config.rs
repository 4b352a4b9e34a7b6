use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

pub const DEFAULT_BASE_URL: &str = "https://kr.indeed.com/jobs";

#[derive(Parser, Debug, Clone)]
#[command(name = "jobscrape", about = "Scrape job search results into a CSV file")]
pub struct Config {
    /// Search term to query for
    pub term: String,

    /// Destination CSV file
    #[arg(long, short, env = "JOBSCRAPE_OUTPUT", default_value = "jobs.csv")]
    pub output: PathBuf,

    /// Search endpoint (host and path) the term is appended to
    #[arg(long, env = "JOBSCRAPE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Number of results the site shows per page
    #[arg(long, default_value = "10")]
    pub page_size: NonZeroUsize,

    /// Prefix joined with a job id to form its detail link
    #[arg(long, env = "JOBSCRAPE_DETAIL_URL_PREFIX")]
    pub detail_url_prefix: Option<String>,

    /// Maximum number of in-flight tasks per fan-out level
    #[arg(long, default_value = "8")]
    pub concurrency: usize,
}

#[cfg(test)]
impl Config {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            output: PathBuf::from("jobs.csv"),
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: NonZeroUsize::new(10).unwrap(),
            detail_url_prefix: None,
            concurrency: 8,
        }
    }
}

impl Config {
    /// Search URL for the configured term, e.g. `https://kr.indeed.com/jobs?q=rust`.
    pub fn search_url(&self) -> String {
        let base = self.base_url.trim_end_matches(['?', '&']);
        let sep = if base.contains('?') { '&' } else { '?' };
        format!(
            "{base}{sep}q={}",
            utf8_percent_encode(self.term.trim(), NON_ALPHANUMERIC)
        )
    }

    /// Resolve the detail link prefix, defaulting to one built from the searched term.
    pub fn resolved_detail_prefix(&self) -> String {
        self.detail_url_prefix
            .clone()
            .unwrap_or_else(|| format!("{}&l&vjk=", self.search_url()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_term() {
        let config = Config::new("rust developer");
        assert_eq!(config.search_url(), "https://kr.indeed.com/jobs?q=rust%20developer");
    }

    #[test]
    fn search_url_extends_existing_query() {
        let mut config = Config::new("rust");
        config.base_url = "https://kr.indeed.com/jobs?l=Seoul".into();
        assert_eq!(config.search_url(), "https://kr.indeed.com/jobs?l=Seoul&q=rust");
    }

    #[test]
    fn rejects_zero_page_size() {
        assert!(Config::try_parse_from(["jobscrape", "python", "--page-size", "0"]).is_err());
        let config = Config::try_parse_from(["jobscrape", "python", "--page-size", "25"]).unwrap();
        assert_eq!(config.page_size.get(), 25);
    }

    #[test]
    fn detail_prefix_follows_searched_term() {
        let config = Config::new("golang");
        assert_eq!(
            config.resolved_detail_prefix(),
            "https://kr.indeed.com/jobs?q=golang&l&vjk="
        );
    }

    #[test]
    fn explicit_detail_prefix_wins() {
        let mut config = Config::new("golang");
        config.detail_url_prefix = Some("https://example.com/view?jk=".into());
        assert_eq!(config.resolved_detail_prefix(), "https://example.com/view?jk=");
    }

    #[test]
    fn parses_cli_defaults() {
        let config = Config::try_parse_from(["jobscrape", "python"]).unwrap();
        assert_eq!(config.term, "python");
        assert_eq!(config.output, PathBuf::from("jobs.csv"));
        assert_eq!(config.page_size.get(), 10);
        assert_eq!(config.concurrency, 8);
        assert!(config.detail_url_prefix.is_none());
    }
}
