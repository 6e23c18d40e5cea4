use crate::config::MailConfig;
use crate::notify::traits::{Notifier, NotifyError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

/// Notifier backed by a transactional mail HTTP API.
///
/// The recipient can be a mailbox or a carrier SMS gateway address
/// (e.g. `<number>@tmomail.net`), which delivers the message as a text.
pub struct MailGatewayNotifier {
    config: MailConfig,
    client: RwLock<reqwest::Client>,
}

#[derive(Serialize)]
struct MailSender<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct MailRecipient<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MailPayload<'a> {
    sender: MailSender<'a>,
    to: Vec<MailRecipient<'a>>,
    subject: &'a str,
    text_content: &'a str,
    html_content: String,
}

fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to create mail HTTP client")
}

impl MailGatewayNotifier {
    pub fn new(config: MailConfig) -> Result<Self> {
        Ok(Self {
            config,
            client: RwLock::new(build_client()?),
        })
    }
}

#[async_trait]
impl Notifier for MailGatewayNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let payload = MailPayload {
            sender: MailSender {
                name: "moto-scout",
                email: &self.config.sender,
            },
            to: vec![MailRecipient {
                email: &self.config.recipient,
            }],
            // SMS gateways render the body only
            subject: "",
            text_content: message,
            html_content: format!("<div dir=\"ltr\">{message}<br></div>"),
        };

        let client = self.client.read().await.clone();
        let response = client
            .post(&self.config.api_url)
            .header("api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api(format!("{status}: {body}")));
        }

        info!("Message sent: {:?}", message);
        Ok(())
    }

    async fn reconnect(&self) -> Result<(), NotifyError> {
        let fresh = build_client().map_err(|e| NotifyError::Channel(e.to_string()))?;
        *self.client.write().await = fresh;
        Ok(())
    }
}
