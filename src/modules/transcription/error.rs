#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing media_url parameter")]
    MissingMediaUrl,
    #[error("It appears that the id is missing. Please review your API call and try again.")]
    MissingCorrelationId,
    #[error("It appears that the webhook_url is missing. Please review your API call and try again.")]
    MissingWebhookUrl,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid media URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Failed to download media: {0}")]
    Request(String),
    #[error("Failed to download media: server responded with status {0}")]
    Status(u16),
    #[error("Failed to store downloaded media: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("Invalid output type. Must be 'transcript' or 'srt'.")]
    InvalidOutputFormat,
    #[error("Failed to read media file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Transcription request failed: {0}")]
    ApiRequestFailed(String),
    #[error("Transcription response could not be parsed: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("webhook request failed: {0}")]
    Request(String),
    #[error("webhook responded with status {0}")]
    Status(u16),
}

/// Everything that can fail a job once it has been accepted.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
    #[error("Transcription task aborted: {0}")]
    Aborted(String),
}
