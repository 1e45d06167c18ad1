use async_trait::async_trait;

use crate::domain::embed::WebhookPayload;
use crate::error::AppResult;

#[async_trait]
pub trait NotifierService: Send + Sync {
    async fn send(&self, payload: &WebhookPayload) -> AppResult<()>;
}
