use std::sync::Arc;

use async_channel::Receiver;
use tokio::task::JoinHandle;
use tracing::{Instrument, error, info, info_span, warn};

use crate::infrastructure::webhook::Notifier;
use crate::modules::transcription::error::JobError;
use crate::modules::transcription::model::{Job, NotificationPayload};
use crate::modules::transcription::service::TranscriptionService;

/// Spawns `count` workers sharing one job queue. They exit once the queue is
/// closed and drained.
pub fn start_transcription_workers(
    count: usize,
    receiver: Receiver<Job>,
    service: Arc<TranscriptionService>,
    notifier: Arc<dyn Notifier>,
) -> Vec<JoinHandle<()>> {
    info!(workers = count, "🎧 Starting transcription workers...");

    (0..count)
        .map(|worker_id| {
            tokio::spawn(run_worker(
                worker_id,
                receiver.clone(),
                Arc::clone(&service),
                Arc::clone(&notifier),
            ))
        })
        .collect()
}

async fn run_worker(
    worker_id: usize,
    receiver: Receiver<Job>,
    service: Arc<TranscriptionService>,
    notifier: Arc<dyn Notifier>,
) {
    info!(worker_id, "Transcription worker listening");

    while let Ok(job) = receiver.recv().await {
        let span = info_span!("transcription_job", job_id = %job.id, worker_id);
        process_job(&service, notifier.as_ref(), job)
            .instrument(span)
            .await;
    }

    info!(worker_id, "Transcription worker stopped: queue closed");
}

/// Sends exactly one notification per job, whatever the outcome.
async fn process_job(service: &Arc<TranscriptionService>, notifier: &dyn Notifier, job: Job) {
    let Some(callback) = job.request.callback.clone() else {
        warn!("Background job has no callback, nothing to notify");
        return;
    };

    info!(media_url = %job.request.media_url, "Starting transcription process");

    // Own task so a panic still ends in a failure notification.
    let task_service = Arc::clone(service);
    let task = tokio::spawn(
        async move { task_service.run(&job).await }.in_current_span(),
    );
    let result = match task.await {
        Ok(result) => result,
        Err(e) => Err(JobError::Aborted(e.to_string())),
    };

    match &result {
        Ok(_) => info!("Transcription process completed successfully"),
        Err(e) => error!(error = %e, "Error during transcription"),
    }

    let payload = NotificationPayload::from_result(callback.correlation_id, result);
    info!(
        webhook_url = %callback.webhook_url,
        code = payload.code,
        "Sending webhook"
    );

    match notifier.notify(&callback.webhook_url, &payload).await {
        Ok(()) => info!("✅ Webhook delivered"),
        Err(e) => error!(error = %e, "❌ Webhook delivery failed"),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use super::*;
    use crate::infrastructure::media::{LocalMedia, MediaFetcher};
    use crate::infrastructure::whisper::Transcriber;
    use crate::modules::transcription::error::{FetchError, NotificationError, TranscriptionError};
    use crate::modules::transcription::model::{
        Callback, CorrelationId, JobId, OutputFormat, TranscriptionRequest,
    };

    struct TempFileFetcher;

    #[async_trait]
    impl MediaFetcher for TempFileFetcher {
        async fn fetch(&self, _url: &str, job_id: JobId) -> Result<LocalMedia, FetchError> {
            let path = std::env::temp_dir().join(format!("{}_worker_test", job_id));
            tokio::fs::write(&path, b"media").await?;
            Ok(LocalMedia::new(path))
        }
    }

    enum Behaviour {
        Succeed,
        Fail,
        Panic,
    }

    struct ScriptedTranscriber(Behaviour);

    #[async_trait]
    impl Transcriber for ScriptedTranscriber {
        async fn transcribe(
            &self,
            _media: &Path,
            _format: OutputFormat,
        ) -> Result<String, TranscriptionError> {
            match self.0 {
                Behaviour::Succeed => Ok("hello world".to_string()),
                Behaviour::Fail => Err(TranscriptionError::ApiRequestFailed("model down".to_string())),
                Behaviour::Panic => panic!("model crashed"),
            }
        }
    }

    struct ChannelNotifier {
        sent: mpsc::UnboundedSender<(String, NotificationPayload)>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for ChannelNotifier {
        async fn notify(
            &self,
            url: &str,
            payload: &NotificationPayload,
        ) -> Result<(), NotificationError> {
            self.sent.send((url.to_string(), payload.clone())).ok();
            if self.fail {
                Err(NotificationError::Status(502))
            } else {
                Ok(())
            }
        }
    }

    fn job(id: &str) -> Job {
        Job::new(TranscriptionRequest {
            media_url: "http://x/a.mp3".to_string(),
            output: "transcript".to_string(),
            callback: Some(Callback {
                webhook_url: "http://cb".to_string(),
                correlation_id: CorrelationId::Text(id.to_string()),
            }),
        })
    }

    fn start(
        behaviour: Behaviour,
        notifier_fails: bool,
    ) -> (
        async_channel::Sender<Job>,
        mpsc::UnboundedReceiver<(String, NotificationPayload)>,
        Vec<JoinHandle<()>>,
    ) {
        let (job_tx, job_rx) = async_channel::bounded(8);
        let (sent_tx, sent_rx) = mpsc::unbounded_channel();
        let service = Arc::new(TranscriptionService::new(
            Arc::new(TempFileFetcher),
            Arc::new(ScriptedTranscriber(behaviour)),
        ));
        let notifier = Arc::new(ChannelNotifier {
            sent: sent_tx,
            fail: notifier_fails,
        });
        let handles = start_transcription_workers(2, job_rx, service, notifier);
        (job_tx, sent_rx, handles)
    }

    async fn next_notification(
        rx: &mut mpsc::UnboundedReceiver<(String, NotificationPayload)>,
    ) -> (String, NotificationPayload) {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("notification timed out")
            .expect("notifier dropped")
    }

    #[tokio::test]
    async fn successful_job_sends_success_payload_and_removes_media() {
        let (tx, mut rx, _handles) = start(Behaviour::Succeed, false);
        let job = job("42");
        let media_path = std::env::temp_dir().join(format!("{}_worker_test", job.id));
        tx.send(job).await.unwrap();

        let (url, payload) = next_notification(&mut rx).await;
        assert_eq!(url, "http://cb");
        assert_eq!(payload, NotificationPayload::success(CorrelationId::Text("42".to_string()), "hello world".to_string()));
        assert!(!media_path.exists());
    }

    #[tokio::test]
    async fn failed_job_sends_failure_payload_and_removes_media() {
        let (tx, mut rx, _handles) = start(Behaviour::Fail, false);
        let job = job("7");
        let media_path = std::env::temp_dir().join(format!("{}_worker_test", job.id));
        tx.send(job).await.unwrap();

        let (_, payload) = next_notification(&mut rx).await;
        assert_eq!(payload.code, 500);
        assert_eq!(payload.response, None);
        assert_eq!(payload.message, "Transcription request failed: model down");
        assert_eq!(payload.id, CorrelationId::Text("7".to_string()));
        assert!(!media_path.exists());
    }

    #[tokio::test]
    async fn panicking_job_still_sends_failure_payload() {
        let (tx, mut rx, _handles) = start(Behaviour::Panic, false);
        tx.send(job("9")).await.unwrap();

        let (_, payload) = next_notification(&mut rx).await;
        assert_eq!(payload.code, 500);
        assert!(payload.message.starts_with("Transcription task aborted"));

        // The worker survives and keeps consuming.
        tx.send(job("10")).await.unwrap();
        let (_, payload) = next_notification(&mut rx).await;
        assert_eq!(payload.id, CorrelationId::Text("10".to_string()));
    }

    #[tokio::test]
    async fn notifier_failure_is_not_retried() {
        let (tx, mut rx, handles) = start(Behaviour::Succeed, true);
        tx.send(job("1")).await.unwrap();

        next_notification(&mut rx).await;
        tx.close();
        for handle in handles {
            handle.await.unwrap();
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn workers_drain_queue_before_stopping() {
        let (tx, mut rx, handles) = start(Behaviour::Succeed, false);
        for id in ["a", "b", "c"] {
            tx.send(job(id)).await.unwrap();
        }
        tx.close();
        for handle in handles {
            handle.await.unwrap();
        }

        let mut ids = Vec::new();
        while let Ok((_, payload)) = rx.try_recv() {
            ids.push(payload.id.to_string());
        }
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
