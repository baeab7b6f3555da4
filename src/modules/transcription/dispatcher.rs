use std::sync::Arc;

use async_channel::{Sender, TrySendError};
use tracing::{Instrument, info, info_span};

use super::error::JobError;
use super::model::{Job, JobId, JobMode, TranscriptionRequest, TranscriptionResult};
use super::service::TranscriptionService;

#[derive(Debug)]
pub enum Dispatched {
    /// Queued for a background worker; the outcome goes to the callback.
    Accepted { job_id: JobId },
    /// Ran in the caller's context.
    Completed {
        job_id: JobId,
        result: TranscriptionResult,
    },
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Job queue is full. Please try again later.")]
    QueueFull,
    #[error("Job queue is closed. The server is shutting down.")]
    QueueClosed,
}

/// Decides between inline and background execution for each accepted request.
pub struct JobDispatcher {
    service: Arc<TranscriptionService>,
    queue: Sender<Job>,
}

impl JobDispatcher {
    pub fn new(service: Arc<TranscriptionService>, queue: Sender<Job>) -> Self {
        Self { service, queue }
    }

    pub async fn dispatch(&self, request: TranscriptionRequest) -> Result<Dispatched, DispatchError> {
        let job = Job::new(request);
        let job_id = job.id;
        let mode = job.mode();
        let span = info_span!("transcription_job", job_id = %job_id, mode = %mode);

        info!(parent: &span, "Generated job_id");

        match mode {
            JobMode::Asynchronous => {
                self.queue.try_send(job).map_err(|e| match e {
                    TrySendError::Full(_) => DispatchError::QueueFull,
                    TrySendError::Closed(_) => DispatchError::QueueClosed,
                })?;
                info!(parent: &span, queued = self.queue.len(), "Job queued for background processing");
                Ok(Dispatched::Accepted { job_id })
            }
            JobMode::Synchronous => {
                info!(parent: &span, "No webhook provided, processing synchronously");
                // Own task so a panic becomes a failed result instead of a dropped connection.
                let service = Arc::clone(&self.service);
                let task = tokio::spawn(async move { service.run(&job).await }.instrument(span));
                let result = match task.await {
                    Ok(result) => result,
                    Err(e) => Err(JobError::Aborted(e.to_string())),
                };
                Ok(Dispatched::Completed { job_id, result })
            }
        }
    }

    /// Stops accepting background jobs; already queued jobs are still delivered.
    pub fn close(&self) {
        self.queue.close();
    }
}
