use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub mail: MailConfig,
    pub log_level: String,
}

/// What to watch and how often.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Region identifiers, one Craigslist subdomain each.
    pub regions: Vec<String>,
    /// Notify only for listings at or below this price.
    pub max_price: i64,
    /// Pause between update cycles.
    pub poll_interval: Duration,
    /// Pause before each per-region request during an update cycle.
    pub region_throttle: Duration,
    /// Pause between successive page requests during backfill.
    pub page_throttle: Duration,
}

/// Delivery channel settings.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub sender: String,
    /// Mailbox or carrier SMS gateway address.
    pub recipient: String,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let regions = env::var("REGIONS")
            .unwrap_or_else(|_| {
                "denver,cosprings,fortcollins,boulder,rockies,westslope".to_string()
            })
            .split(',')
            .map(|region| region.trim().to_string())
            .filter(|region| !region.is_empty())
            .collect();

        Ok(Config {
            search: SearchConfig {
                regions,
                max_price: env_or("MAX_PRICE", 3500),
                poll_interval: Duration::from_secs(env_or("POLL_INTERVAL_SECS", 120)),
                region_throttle: Duration::from_secs(env_or("REGION_THROTTLE_SECS", 30)),
                page_throttle: Duration::from_secs(env_or("PAGE_THROTTLE_SECS", 2)),
            },
            mail: MailConfig {
                api_url: env::var("MAIL_API_URL")
                    .unwrap_or_else(|_| "https://api.brevo.com/v3/smtp/email".to_string()),
                api_key: env::var("MAIL_API_KEY").context("MAIL_API_KEY must be set")?,
                sender: env::var("MAIL_SENDER").context("MAIL_SENDER must be set")?,
                recipient: env::var("MAIL_RECIPIENT").context("MAIL_RECIPIENT must be set")?,
            },
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
