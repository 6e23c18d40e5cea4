use crate::models::Listing;

/// Result of a check-and-insert against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The title was not known; the listing is now stored.
    Inserted,
    /// A listing with the same title is already stored; nothing changed.
    AlreadyPresent,
}

/// Every listing seen so far, kept sorted by title.
///
/// The title is the dedup key: two listings sharing a title are treated as
/// the same listing and the first one seen wins, whatever their links or
/// prices. Coincidental title collisions between distinct ads are therefore
/// folded together; a stronger key would need per-ad identifiers the source
/// does not reliably expose.
///
/// Memory is process-lifetime only. The store has a single owner (the poll
/// loop), so search-and-insert is atomic without locking.
#[derive(Debug, Default)]
pub struct ListingStore {
    listings: Vec<Listing>,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check-and-insert in one step.
    ///
    /// Binary search on the title finds the insertion point in O(log n)
    /// comparisons; an equal title at that point makes this a no-op.
    pub fn upsert(&mut self, listing: Listing) -> InsertOutcome {
        let position = self
            .listings
            .binary_search_by(|known| known.title.as_str().cmp(listing.title.as_str()));

        match position {
            Ok(_) => InsertOutcome::AlreadyPresent,
            Err(index) => {
                self.listings.insert(index, listing);
                InsertOutcome::Inserted
            }
        }
    }

    /// Load an initial batch, applying the same dedup rule as [`upsert`].
    ///
    /// Paginated results can repeat a listing across pages, so duplicates
    /// within the batch keep the first occurrence only.
    ///
    /// [`upsert`]: ListingStore::upsert
    pub fn bulk_load(&mut self, listings: impl IntoIterator<Item = Listing>) {
        for listing in listings {
            self.upsert(listing);
        }
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Stored titles in order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.listings.iter().map(|listing| listing.title.as_str())
    }

    /// Stored listings in title order.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }
}
