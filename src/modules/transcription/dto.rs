use serde::Deserialize;
use utoipa::ToSchema;

use super::error::ValidationError;
use super::model::{Callback, CorrelationId, TranscriptionRequest};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TranscribeRequest {
    pub media_url: Option<String>,
    /// `transcript` (default) or `srt`, case-insensitive.
    pub output: Option<String>,
    pub webhook_url: Option<String>,
    #[schema(value_type = Option<String>)]
    pub id: Option<CorrelationId>,
}

impl TranscribeRequest {
    /// media_url is checked before the webhook_url/id pairing.
    pub fn validate(self) -> Result<TranscriptionRequest, ValidationError> {
        let media_url = self
            .media_url
            .filter(|url| !url.is_empty())
            .ok_or(ValidationError::MissingMediaUrl)?;

        let webhook_url = self.webhook_url.filter(|url| !url.is_empty());
        let id = self.id.filter(|id| !id.is_blank());

        let callback = match (webhook_url, id) {
            (Some(webhook_url), Some(correlation_id)) => Some(Callback {
                webhook_url,
                correlation_id,
            }),
            (Some(_), None) => return Err(ValidationError::MissingCorrelationId),
            (None, Some(_)) => return Err(ValidationError::MissingWebhookUrl),
            (None, None) => None,
        };

        Ok(TranscriptionRequest {
            media_url,
            output: self.output.unwrap_or_else(|| "transcript".to_string()),
            callback,
        })
    }
}
