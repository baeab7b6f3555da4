#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;

use media_transcriber::app::create_app;
use media_transcriber::config::settings::{AppConfig, LogFormat};
use media_transcriber::infrastructure::media::{LocalMedia, MediaFetcher};
use media_transcriber::infrastructure::webhook::Notifier;
use media_transcriber::infrastructure::whisper::Transcriber;
use media_transcriber::modules::transcription::dispatcher::JobDispatcher;
use media_transcriber::modules::transcription::error::{
    FetchError, NotificationError, TranscriptionError,
};
use media_transcriber::modules::transcription::model::{
    JobId, NotificationPayload, OutputFormat,
};
use media_transcriber::modules::transcription::service::TranscriptionService;
use media_transcriber::state::AppState;
use media_transcriber::workers::transcriber::start_transcription_workers;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_SRT: &str = "1\n00:00:00,000 --> 00:00:01,000\nhello\n\n";
pub const TEST_TRANSCRIPT: &str = "hello";

pub fn test_config(pairing_error_status: StatusCode) -> AppConfig {
    AppConfig {
        server_port: 0,
        api_key: TEST_API_KEY.to_string(),
        storage_path: std::env::temp_dir(),
        whisper_api_url: "http://127.0.0.1:9".to_string(),
        whisper_api_key: String::new(),
        whisper_model: "whisper-1".to_string(),
        worker_count: 2,
        job_queue_capacity: 8,
        webhook_timeout: Duration::from_secs(5),
        pairing_error_status,
        log_format: LogFormat::Pretty,
    }
}

/// Writes a small file per job and remembers every URL it was asked for.
#[derive(Default)]
pub struct RecordingFetcher {
    pub urls: Mutex<Vec<String>>,
    pub paths: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl MediaFetcher for RecordingFetcher {
    async fn fetch(&self, url: &str, job_id: JobId) -> Result<LocalMedia, FetchError> {
        self.urls.lock().unwrap().push(url.to_string());
        let path = std::env::temp_dir().join(format!("{}_api_test.mp3", job_id));
        tokio::fs::write(&path, b"fake media").await?;
        self.paths.lock().unwrap().push(path.clone());
        Ok(LocalMedia::new(path))
    }
}

pub struct FakeTranscriber {
    pub fail_with: Option<String>,
    /// When set, transcription waits until the gate is opened.
    pub gate: Option<Arc<Notify>>,
    pub panics: bool,
}

impl FakeTranscriber {
    pub fn succeeding() -> Self {
        Self {
            fail_with: None,
            gate: None,
            panics: false,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            gate: None,
            panics: false,
        }
    }

    pub fn panicking() -> Self {
        Self {
            fail_with: None,
            gate: None,
            panics: true,
        }
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            fail_with: None,
            gate: Some(gate),
            panics: false,
        }
    }
}

#[async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe(
        &self,
        media: &Path,
        format: OutputFormat,
    ) -> Result<String, TranscriptionError> {
        assert!(media.exists(), "media must exist while transcribing");
        if self.panics {
            panic!("model crashed");
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(message) = &self.fail_with {
            return Err(TranscriptionError::ApiRequestFailed(message.clone()));
        }
        Ok(match format {
            OutputFormat::Transcript => TEST_TRANSCRIPT.to_string(),
            OutputFormat::Srt => TEST_SRT.to_string(),
        })
    }
}

pub struct ChannelNotifier {
    pub sent: mpsc::UnboundedSender<(String, NotificationPayload)>,
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn notify(
        &self,
        url: &str,
        payload: &NotificationPayload,
    ) -> Result<(), NotificationError> {
        self.sent.send((url.to_string(), payload.clone())).ok();
        Ok(())
    }
}

pub struct TestApp {
    pub router: axum::Router,
    pub fetcher: Arc<RecordingFetcher>,
    pub notifications: mpsc::UnboundedReceiver<(String, NotificationPayload)>,
    pub workers: Vec<JoinHandle<()>>,
    pub dispatcher: Arc<JobDispatcher>,
    /// Kept alive when no workers consume the queue.
    pub idle_queue: Option<async_channel::Receiver<media_transcriber::modules::transcription::model::Job>>,
}

pub fn create_test_app(transcriber: FakeTranscriber, config: AppConfig) -> TestApp {
    build(transcriber, config, true)
}

/// No workers: queued jobs stay in the queue.
pub fn create_test_app_without_workers(config: AppConfig) -> TestApp {
    build(FakeTranscriber::succeeding(), config, false)
}

fn build(transcriber: FakeTranscriber, config: AppConfig, with_workers: bool) -> TestApp {
    let fetcher = Arc::new(RecordingFetcher::default());
    let service = Arc::new(TranscriptionService::new(
        Arc::clone(&fetcher) as Arc<dyn MediaFetcher>,
        Arc::new(transcriber),
    ));

    let (sent_tx, notifications) = mpsc::unbounded_channel();
    let notifier = Arc::new(ChannelNotifier { sent: sent_tx });

    let (job_tx, job_rx) = async_channel::bounded(config.job_queue_capacity);
    let (workers, idle_queue) = if with_workers {
        (
            start_transcription_workers(config.worker_count, job_rx, Arc::clone(&service), notifier),
            None,
        )
    } else {
        (Vec::new(), Some(job_rx))
    };

    let dispatcher = Arc::new(JobDispatcher::new(service, job_tx));
    let router = create_app(AppState::new(config, Arc::clone(&dispatcher)));

    TestApp {
        router,
        fetcher,
        notifications,
        workers,
        dispatcher,
        idle_queue,
    }
}
