use std::time::Duration;

use async_trait::async_trait;

use super::Notifier;
use crate::modules::transcription::error::NotificationError;
use crate::modules::transcription::model::NotificationPayload;

pub struct HttpNotifier {
    client: reqwest::Client,
}

impl HttpNotifier {
    pub fn new(timeout: Duration) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotificationError::Request(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(
        &self,
        url: &str,
        payload: &NotificationPayload,
    ) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| NotificationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::Status(status.as_u16()));
        }

        tracing::debug!(status = status.as_u16(), "Webhook acknowledged");
        Ok(())
    }
}
