use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::modules::transcription::dispatcher::JobDispatcher;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub dispatcher: Arc<JobDispatcher>,
}

impl AppState {
    pub fn new(config: AppConfig, dispatcher: Arc<JobDispatcher>) -> Self {
        Self { config, dispatcher }
    }
}
