use std::path::Path;

use async_trait::async_trait;

use crate::modules::transcription::error::TranscriptionError;
use crate::modules::transcription::model::OutputFormat;

mod client;
pub mod subtitle;

pub use client::WhisperTranscriber;

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(
        &self,
        media: &Path,
        format: OutputFormat,
    ) -> Result<String, TranscriptionError>;
}
