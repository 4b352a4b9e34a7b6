use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::collectors::JobCollector;
use crate::error::ScrapeError;
use crate::fanout::gather;
use crate::http::{build_client, fetch_html};
use crate::models::job::Job;

const PAGINATION: &str = ".pagination";
const PAGE_LINK: &str = "a";
const CARD: &str = ".jobsearch-SerpJobCard";
const TITLE: &str = ".title>a";
const LOCATION: &str = ".sjcl";
const SALARY: &str = ".salaryText";
const SUMMARY: &str = ".summary";
const JOB_KEY_ATTR: &str = "data-jk";

/// Compiled selectors for the search result markup.
#[derive(Debug)]
pub struct Selectors {
    pagination: Selector,
    page_link: Selector,
    card: Selector,
    title: Selector,
    location: Selector,
    salary: Selector,
    summary: Selector,
}

impl Selectors {
    pub fn compile() -> Result<Self, ScrapeError> {
        Ok(Self {
            pagination: selector(PAGINATION)?,
            page_link: selector(PAGE_LINK)?,
            card: selector(CARD)?,
            title: selector(TITLE)?,
            location: selector(LOCATION)?,
            salary: selector(SALARY)?,
            summary: selector(SUMMARY)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(format!("invalid selector {css:?}: {e:?}")))
}

#[derive(Clone)]
pub struct Indeed {
    client: Client,
    selectors: Arc<Selectors>,
    page_size: NonZeroUsize,
    concurrency: usize,
}

#[async_trait]
impl JobCollector for Indeed {
    fn name(&self) -> &str {
        "indeed"
    }

    async fn collect(&self, search_url: &str) -> Result<Vec<Job>, ScrapeError> {
        let total_pages = self.page_count(search_url).await?;
        tracing::info!("Found {total_pages} result pages");

        let base: Arc<str> = Arc::from(search_url);
        let this = self.clone();
        let pages = gather((0..total_pages).collect::<Vec<_>>(), self.concurrency, move |page| {
            let this = this.clone();
            let base = Arc::clone(&base);
            async move { this.fetch_page(&base, page).await }
        })
        .await?;

        Ok(pages.into_iter().flatten().collect())
    }
}

impl Indeed {
    pub fn new(page_size: NonZeroUsize, concurrency: usize) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: build_client()?,
            selectors: Arc::new(Selectors::compile()?),
            page_size,
            concurrency,
        })
    }

    /// Number of result pages, read from the pagination links of the first page.
    pub async fn page_count(&self, search_url: &str) -> Result<usize, ScrapeError> {
        let body = fetch_html(&self.client, search_url).await?;
        Ok(count_pages(&body, &self.selectors))
    }

    /// Fetch one result page and extract every job card on it.
    pub async fn fetch_page(&self, search_url: &str, page: usize) -> Result<Vec<Job>, ScrapeError> {
        let page_url = format!("{search_url}&start={}", page * self.page_size.get());
        tracing::info!("Requesting {page_url}");

        let body = fetch_html(&self.client, &page_url).await?;
        let cards = raw_cards(&body, &self.selectors);
        tracing::debug!("{} cards on page {page}", cards.len());

        gather(cards, self.concurrency, |card| async move { Ok(card.into_job()) }).await
    }
}

fn count_pages(body: &str, selectors: &Selectors) -> usize {
    let document = Html::parse_document(body);
    document
        .select(&selectors.pagination)
        .next()
        .map(|pagination| pagination.select(&selectors.page_link).count())
        .unwrap_or(0)
}

/// Card contents as found in the page, before whitespace cleanup.
/// Owns its data so it can be handed to a worker task; the parsed
/// document itself is not `Send`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCard {
    id: String,
    title: String,
    location: String,
    salary: String,
    summary: String,
}

impl RawCard {
    pub fn into_job(self) -> Job {
        Job {
            id: self.id,
            location: clean_text(&self.location),
            title: clean_text(&self.title),
            salary: clean_text(&self.salary),
            summary: clean_text(&self.summary),
        }
    }
}

fn raw_cards(body: &str, selectors: &Selectors) -> Vec<RawCard> {
    let document = Html::parse_document(body);
    document
        .select(&selectors.card)
        .map(|card| raw_card(card, selectors))
        .collect()
}

/// Read one result card. Missing pieces become empty strings.
pub fn raw_card(card: ElementRef<'_>, selectors: &Selectors) -> RawCard {
    let text_of = |sel: &Selector| card.select(sel).flat_map(|el| el.text()).collect::<String>();

    RawCard {
        id: card.value().attr(JOB_KEY_ATTR).unwrap_or_default().to_string(),
        title: text_of(&selectors.title),
        location: text_of(&selectors.location),
        salary: text_of(&selectors.salary),
        summary: text_of(&selectors.summary),
    }
}

/// Trim and collapse every whitespace run to a single space.
pub fn clean_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
