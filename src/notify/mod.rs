pub mod mail_gateway;
pub mod traits;

pub use mail_gateway::MailGatewayNotifier;
pub use traits::{Notifier, NotifyError};

use tracing::warn;

/// Deliver a message with the best-effort retry contract: on failure,
/// re-establish the channel once and retry the same message exactly once.
/// A second failure drops the message.
pub async fn send_with_retry<N: Notifier + ?Sized>(notifier: &N, message: &str) {
    let first = match notifier.notify(message).await {
        Ok(()) => return,
        Err(e) => e,
    };
    warn!("notification failed, reconnecting: {first}");

    if let Err(e) = notifier.reconnect().await {
        warn!("reconnect failed, dropping message: {e}");
        return;
    }
    if let Err(e) = notifier.notify(message).await {
        warn!("notification failed after reconnect, dropping message: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Notifier that fails the first `failures` sends.
    struct FlakyNotifier {
        failures: AtomicUsize,
        reconnects: AtomicUsize,
        delivered: Mutex<Vec<String>>,
    }

    impl FlakyNotifier {
        fn failing(failures: usize) -> Self {
            Self {
                failures: AtomicUsize::new(failures),
                reconnects: AtomicUsize::new(0),
                delivered: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Notifier for FlakyNotifier {
        async fn notify(&self, message: &str) -> Result<(), NotifyError> {
            let remaining = self.failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return Err(NotifyError::Api("simulated outage".to_string()));
            }
            self.delivered.lock().unwrap().push(message.to_string());
            Ok(())
        }

        async fn reconnect(&self) -> Result<(), NotifyError> {
            self.reconnects.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn delivers_without_retry_when_healthy() {
        let notifier = FlakyNotifier::failing(0);
        send_with_retry(&notifier, "hello").await;

        assert_eq!(*notifier.delivered.lock().unwrap(), vec!["hello"]);
        assert_eq!(notifier.reconnects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn one_failure_reconnects_and_retries_the_same_message() {
        let notifier = FlakyNotifier::failing(1);
        send_with_retry(&notifier, "new listing").await;

        assert_eq!(*notifier.delivered.lock().unwrap(), vec!["new listing"]);
        assert_eq!(notifier.reconnects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn second_failure_drops_the_message() {
        let notifier = FlakyNotifier::failing(2);
        send_with_retry(&notifier, "lost").await;

        assert!(notifier.delivered.lock().unwrap().is_empty());
        // exactly one reconnect, no unbounded retrying
        assert_eq!(notifier.reconnects.load(Ordering::SeqCst), 1);
    }
}
