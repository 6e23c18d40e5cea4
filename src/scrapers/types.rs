/// Results per page, fixed by the source site.
pub const PAGE_SIZE: u64 = 120;

/// One result row as it appears on the page, before normalization.
#[derive(Debug, Clone)]
pub struct RawListing {
    pub title: String,
    pub link: String,
    /// Display price text, e.g. "$3,500".
    pub price: String,
}

/// One page of search results for a region.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub listings: Vec<RawListing>,
    /// Total result count across all pages; reported on the first page only.
    pub total_count: Option<u64>,
}

impl Page {
    /// Number of pages covering `total_count` results, rounded up.
    ///
    /// A page without a reported total counts as a single page.
    pub fn total_pages(&self) -> u64 {
        match self.total_count {
            Some(0) | None => 1,
            Some(total) => (total + PAGE_SIZE - 1) / PAGE_SIZE,
        }
    }
}
