use std::path::PathBuf;
use std::time::Duration;

use axum::http::StatusCode;

use crate::config::env::{self, EnvKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_env_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub api_key: String,
    pub storage_path: PathBuf,
    pub whisper_api_url: String,
    pub whisper_api_key: String,
    pub whisper_model: String,
    pub worker_count: usize,
    pub job_queue_capacity: usize,
    pub webhook_timeout: Duration,
    /// Status returned when only one of `webhook_url` / `id` is supplied.
    pub pairing_error_status: StatusCode,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Self::from_lookup(env::process_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, std::env::VarError> {
        let storage_path = env::get(&lookup, EnvKey::StoragePath)
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir());

        Ok(Self {
            server_port: env::get_parsed(&lookup, EnvKey::ServerPort, 3000),
            api_key: env::get(&lookup, EnvKey::ApiKey)?,
            storage_path,
            whisper_api_url: env::get_or(&lookup, EnvKey::WhisperApiUrl, "https://api.openai.com/v1"),
            whisper_api_key: env::get_or(&lookup, EnvKey::WhisperApiKey, ""),
            whisper_model: env::get_or(&lookup, EnvKey::WhisperModel, "whisper-1"),
            worker_count: env::get_parsed(&lookup, EnvKey::WorkerCount, 4usize).max(1),
            job_queue_capacity: env::get_parsed(&lookup, EnvKey::JobQueueCapacity, 64usize).max(1),
            webhook_timeout: Duration::from_secs(env::get_parsed(
                &lookup,
                EnvKey::WebhookTimeoutSecs,
                30,
            )),
            pairing_error_status: pairing_status_from_code(env::get_parsed(
                &lookup,
                EnvKey::PairingErrorStatus,
                500u16,
            )),
            log_format: LogFormat::from_env_value(&env::get_or(&lookup, EnvKey::LogFormat, "pretty")),
        })
    }
}

/// Only 400 opts out of the legacy 500 response.
pub fn pairing_status_from_code(code: u16) -> StatusCode {
    match code {
        400 => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
