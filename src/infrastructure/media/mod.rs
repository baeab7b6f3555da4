use async_trait::async_trait;

use crate::modules::transcription::error::FetchError;
use crate::modules::transcription::model::JobId;

mod fetcher;
mod local_media;

pub use fetcher::HttpMediaFetcher;
pub use local_media::LocalMedia;

/// Retrieves remote media into local ephemeral storage.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// The returned handle owns the downloaded file and removes it on drop.
    async fn fetch(&self, url: &str, job_id: JobId) -> Result<LocalMedia, FetchError>;
}
