use crate::scrapers::types::Page;
use async_trait::async_trait;
use thiserror::Error;

/// Failure to retrieve or parse one page of results.
///
/// Never fatal: the poll loop skips the affected region and tries again on
/// the next cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("unexpected markup: {0}")]
    Markup(String),
}

/// Common trait for listing page fetchers.
/// This allows easy addition of new sources and lets the poll loop run
/// against fake pages in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page of listings for a region, starting at `offset`.
    ///
    /// The first page (offset 0) also carries the total result count.
    async fn fetch_page(&self, region: &str, offset: u64) -> Result<Page, FetchError>;

    /// Get the name of the backing source
    fn source_name(&self) -> &'static str;
}
