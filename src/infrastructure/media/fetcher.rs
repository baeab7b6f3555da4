use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

use super::{LocalMedia, MediaFetcher};
use crate::modules::transcription::error::FetchError;
use crate::modules::transcription::model::JobId;

#[derive(Clone)]
pub struct HttpMediaFetcher {
    client: reqwest::Client,
    storage_path: PathBuf,
}

impl HttpMediaFetcher {
    pub fn new(storage_path: PathBuf) -> Self {
        Self {
            client: reqwest::Client::new(),
            storage_path,
        }
    }

    /// `<storage>/<job_id>_input[.ext]`, keyed by job so concurrent jobs never collide.
    fn destination(&self, url: &Url, job_id: JobId) -> PathBuf {
        let extension = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()));

        let file_name = match extension {
            Some(ext) => format!("{}_input.{}", job_id, ext.to_ascii_lowercase()),
            None => format!("{}_input", job_id),
        };
        self.storage_path.join(file_name)
    }
}

fn parse_media_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(FetchError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

#[async_trait]
impl MediaFetcher for HttpMediaFetcher {
    async fn fetch(&self, url: &str, job_id: JobId) -> Result<LocalMedia, FetchError> {
        let url = parse_media_url(url)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        tokio::fs::create_dir_all(&self.storage_path).await?;

        // Handle exists before the file so a failed stream still cleans up.
        let media = LocalMedia::new(self.destination(&url, job_id));
        let mut file = tokio::fs::File::create(media.path()).await?;

        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| FetchError::Request(e.to_string()))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!(bytes = written, "Media stream written to disk");
        info!(path = %media.path().display(), "Downloaded media to local file");

        Ok(media)
    }
}
