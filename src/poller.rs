use crate::config::SearchConfig;
use crate::models::Listing;
use crate::notify::{send_with_retry, Notifier};
use crate::scrapers::{FetchError, PageFetcher, RawListing, PAGE_SIZE};
use crate::store::{InsertOutcome, ListingStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{info, warn};

/// Drives the fetch → normalize → upsert → notify cycle across all regions.
///
/// Owns the listing store for the process lifetime; everything runs on one
/// task, sequentially, with explicit throttle pauses between requests.
pub struct Poller<F, N> {
    fetcher: F,
    notifier: N,
    store: ListingStore,
    config: SearchConfig,
}

impl<F: PageFetcher, N: Notifier> Poller<F, N> {
    pub fn new(fetcher: F, notifier: N, config: SearchConfig) -> Self {
        Self {
            fetcher,
            notifier,
            store: ListingStore::new(),
            config,
        }
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    /// Establish the baseline: page through every region and load the store.
    ///
    /// Backfilled listings are the known world, so no notifications here.
    pub async fn backfill(&mut self) {
        let regions = self.config.regions.clone();
        for region in &regions {
            let loaded = self.backfill_region(region).await;
            info!("backfilled {loaded} listings from {region}");
        }
        info!(
            "baseline established via {}: {} listings across {} regions",
            self.fetcher.source_name(),
            self.store.len(),
            regions.len()
        );
    }

    /// Collect every page for one region and bulk-load the batch.
    ///
    /// A fetch failure abandons the region's remaining pages; whatever was
    /// already collected still goes into the baseline.
    async fn backfill_region(&mut self, region: &str) -> usize {
        let mut batch = Vec::new();
        if let Err(e) = self.collect_region(region, &mut batch).await {
            warn!("backfill for {region} stopped early: {e}");
        }
        let loaded = batch.len();
        self.store.bulk_load(batch);
        loaded
    }

    async fn collect_region(
        &mut self,
        region: &str,
        batch: &mut Vec<Listing>,
    ) -> Result<(), FetchError> {
        let first = self.fetcher.fetch_page(region, 0).await?;
        let total_pages = first.total_pages();
        batch.extend(normalize(first.listings));

        for page in 1..total_pages {
            sleep(self.config.page_throttle).await;
            let next = self.fetcher.fetch_page(region, page * PAGE_SIZE).await?;
            batch.extend(normalize(next.listings));
        }
        Ok(())
    }

    /// One steady-state cycle: the first page of each region is the cheapest
    /// signal of what's new.
    ///
    /// A fetch failure skips that region until the next cycle.
    pub async fn update(&mut self) {
        let regions = self.config.regions.clone();
        for region in &regions {
            sleep(self.config.region_throttle).await;

            let page = match self.fetcher.fetch_page(region, 0).await {
                Ok(page) => page,
                Err(e) => {
                    warn!("update for {region} skipped: {e}");
                    continue;
                }
            };

            for listing in normalize(page.listings) {
                self.ingest(listing).await;
            }
        }
    }

    async fn ingest(&mut self, listing: Listing) {
        let price = listing.price;
        let message = listing.description();
        let title = listing.title.clone();

        match self.store.upsert(listing) {
            InsertOutcome::AlreadyPresent => {}
            InsertOutcome::Inserted => {
                info!("new listing: {title}");
                if price <= self.config.max_price {
                    send_with_retry(&self.notifier, &message).await;
                }
            }
        }
    }

    /// Backfill, then poll until `shutdown` is set.
    ///
    /// The flag is only observed at the top of each cycle; in-flight requests
    /// finish naturally. The shutdown notification goes out from here, in
    /// normal control flow, never from signal context.
    pub async fn run(mut self, shutdown: Arc<AtomicBool>) {
        self.backfill().await;
        send_with_retry(&self.notifier, "Market notifications on").await;

        while !shutdown.load(Ordering::Relaxed) {
            self.update().await;
            sleep(self.config.poll_interval).await;
        }

        info!("poll loop stopped");
        send_with_retry(&self.notifier, "Market notifications off").await;
    }
}

/// Convert raw records, dropping the ones that fail to normalize.
fn normalize(raw: Vec<RawListing>) -> Vec<Listing> {
    raw.into_iter()
        .filter_map(|record| {
            Listing::new(record.title, record.link, record.price)
                .map_err(|e| warn!("skipping record: {e}"))
                .ok()
        })
        .collect()
}
