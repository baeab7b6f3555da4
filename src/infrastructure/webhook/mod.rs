use async_trait::async_trait;

use crate::modules::transcription::error::NotificationError;
use crate::modules::transcription::model::NotificationPayload;

mod notifier;

pub use notifier::HttpNotifier;

/// Single best-effort delivery of a job outcome.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        url: &str,
        payload: &NotificationPayload,
    ) -> Result<(), NotificationError>;
}
