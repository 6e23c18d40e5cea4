use chrono::{DateTime, Utc};
use thiserror::Error;

/// A raw record whose price text carries no parseable amount.
///
/// The record is dropped by the caller; one bad row must not abort a batch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed listing {title:?}: no price in {raw_price:?}")]
pub struct MalformedListing {
    pub title: String,
    pub raw_price: String,
}

/// Normalized representation of one classifieds entry.
///
/// `title` doubles as the dedup and ordering key used by the store.
#[derive(Debug, Clone)]
pub struct Listing {
    pub title: String,
    pub link: String,
    /// Numeric price, parsed from the display text.
    pub price: i64,
    /// Original formatted price text, kept for notification messages.
    pub price_display: String,
    pub seen_at: DateTime<Utc>,
}

impl Listing {
    /// Build a listing from raw page text.
    ///
    /// The price is derived by stripping every non-digit character except the
    /// minus sign from `raw_price` ("$3,500" parses as 3500). An empty or
    /// negative result fails construction.
    pub fn new(
        title: String,
        link: String,
        raw_price: String,
    ) -> Result<Self, MalformedListing> {
        let digits: String = raw_price
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '-')
            .collect();

        match digits.parse::<i64>() {
            Ok(price) if price >= 0 => Ok(Self {
                title,
                link,
                price,
                price_display: raw_price,
                seen_at: Utc::now(),
            }),
            _ => Err(MalformedListing { title, raw_price }),
        }
    }

    /// One-line summary used as the notification body.
    pub fn description(&self) -> String {
        format!("{} - {}\n{}", self.price_display, self.title, self.link)
    }
}
