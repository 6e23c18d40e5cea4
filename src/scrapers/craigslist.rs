use crate::scrapers::traits::{FetchError, PageFetcher};
use crate::scrapers::types::{Page, RawListing};
use anyhow::{Context, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

/// Craigslist motorcycle search scraper
pub struct CraigslistFetcher {
    client: reqwest::Client,
    result_row: Selector,
    title_link: Selector,
    price: Selector,
    total_count: Selector,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("invalid selector {css:?}: {e}"))
}

impl CraigslistFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            result_row: selector("li.result-row")?,
            title_link: selector("a.result-title.hdrlnk")?,
            price: selector("span.result-price")?,
            total_count: selector("span.totalcount")?,
        })
    }

    /// Pull result rows out of a search page.
    ///
    /// Rows missing a title, link, or price are skipped; markup drifts and a
    /// partial page is still useful. The page-level total count is required
    /// on the first page, where pagination is derived from it.
    fn parse_page(&self, html: &str, expect_total: bool) -> Result<Page, FetchError> {
        let document = Html::parse_document(html);

        let mut listings = Vec::new();
        for row in document.select(&self.result_row) {
            let Some(anchor) = row.select(&self.title_link).next() else {
                debug!("result row without a title link, skipping");
                continue;
            };
            let title = anchor.text().collect::<String>().trim().to_string();
            let Some(link) = anchor.attr("href") else {
                debug!("result row without an href, skipping");
                continue;
            };
            let Some(price) = row.select(&self.price).next() else {
                debug!("result row without a price, skipping");
                continue;
            };
            let price = price.text().collect::<String>().trim().to_string();

            if title.is_empty() || link.is_empty() {
                continue;
            }

            listings.push(RawListing {
                title,
                link: link.to_string(),
                price,
            });
        }

        let total_count = document
            .select(&self.total_count)
            .next()
            .and_then(|count| count.text().collect::<String>().trim().parse::<u64>().ok());

        if expect_total && total_count.is_none() {
            return Err(FetchError::Markup(
                "first page is missing the total result count".to_string(),
            ));
        }

        Ok(Page {
            listings,
            total_count,
        })
    }

    fn search_url(region: &str, offset: u64) -> String {
        if offset == 0 {
            format!("https://{region}.craigslist.org/search/mcy")
        } else {
            format!("https://{region}.craigslist.org/search/mcy?s={offset}")
        }
    }
}

#[async_trait]
impl PageFetcher for CraigslistFetcher {
    async fn fetch_page(&self, region: &str, offset: u64) -> Result<Page, FetchError> {
        let url = Self::search_url(region, offset);
        debug!("Fetching URL: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            warn!("{} returned status {}", url, response.status());
            return Err(FetchError::Status(response.status()));
        }

        let html = response.text().await?;
        debug!("Downloaded {} bytes of HTML", html.len());

        self.parse_page(&html, offset == 0)
    }

    fn source_name(&self) -> &'static str {
        "craigslist"
    }
}
