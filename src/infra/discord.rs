use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use tracing::info;

use crate::domain::embed::WebhookPayload;
use crate::error::{AppError, AppResult};
use crate::services::NotifierService;

pub struct DiscordWebhook {
    http: Client,
    webhook_url: Option<String>,
}

impl DiscordWebhook {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            http: Client::new(),
            webhook_url,
        }
    }

    fn endpoint(&self) -> AppResult<&str> {
        self.webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::Configuration("webhook URL not configured".to_string()))
    }
}

#[async_trait]
impl NotifierService for DiscordWebhook {
    async fn send(&self, payload: &WebhookPayload) -> AppResult<()> {
        let endpoint = self.endpoint()?;

        let response = self
            .http
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|err| AppError::Notifier(format!("failed to call webhook: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Notifier(format!(
                "webhook responded with {status}: {body}"
            )));
        }

        info!(%status, "notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_webhook_is_a_configuration_error() {
        let webhook = DiscordWebhook::new(Some("   ".to_string()));
        assert!(matches!(
            webhook.endpoint(),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn trims_configured_webhook() {
        let webhook = DiscordWebhook::new(Some(" https://discord.test/api/webhooks/1/x ".to_string()));
        assert_eq!(
            webhook.endpoint().unwrap(),
            "https://discord.test/api/webhooks/1/x"
        );
    }
}
