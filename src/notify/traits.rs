use async_trait::async_trait;
use thiserror::Error;

/// Failure to deliver a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("mail API rejected the message: {0}")]
    Api(String),

    #[error("could not rebuild the delivery client: {0}")]
    Channel(String),
}

/// Delivery channel for alert messages.
///
/// Destinations are plain addresses; a carrier's email-to-SMS gateway address
/// turns the same channel into text messages.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one plain-text message.
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;

    /// Re-establish the delivery channel after a failed send.
    async fn reconnect(&self) -> Result<(), NotifyError>;
}
