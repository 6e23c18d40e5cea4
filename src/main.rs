use moto_scout::config::Config;
use moto_scout::notify::MailGatewayNotifier;
use moto_scout::poller::Poller;
use moto_scout::scrapers::CraigslistFetcher;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🏍️ Moto Scout - Craigslist motorcycle watcher");
    info!("regions: {}", config.search.regions.join(", "));
    info!("max price: ${}", config.search.max_price);

    let fetcher = CraigslistFetcher::new()?;
    let notifier = MailGatewayNotifier::new(config.mail)?;

    // The signal task only flips the flag; the poll loop does the rest.
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping after this cycle");
            flag.store(true, Ordering::Relaxed);
        }
    });

    Poller::new(fetcher, notifier, config.search)
        .run(shutdown)
        .await;

    info!("stopped");
    Ok(())
}
