use std::sync::Arc;

use tracing::info;

use super::model::{Job, OutputFormat, TranscriptionResult};
use crate::infrastructure::media::MediaFetcher;
use crate::infrastructure::whisper::Transcriber;

/// Fetch followed by transcription for a single job.
pub struct TranscriptionService {
    fetcher: Arc<dyn MediaFetcher>,
    transcriber: Arc<dyn Transcriber>,
}

impl TranscriptionService {
    pub fn new(fetcher: Arc<dyn MediaFetcher>, transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            fetcher,
            transcriber,
        }
    }

    pub async fn run(&self, job: &Job) -> TranscriptionResult {
        let request = &job.request;
        info!(
            media_url = %request.media_url,
            output_type = %request.output,
            "Starting transcription"
        );

        let format: OutputFormat = request.output.parse()?;

        let media = self.fetcher.fetch(&request.media_url, job.id).await?;

        // `media` is dropped on every return below, removing the download.
        let output = self
            .transcriber
            .transcribe(media.path(), format)
            .await?;

        info!(output_type = %format, "Transcription successful");
        Ok(output)
    }
}
