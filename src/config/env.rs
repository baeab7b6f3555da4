use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    ApiKey,
    StoragePath,
    WhisperApiUrl,
    WhisperApiKey,
    WhisperModel,
    WorkerCount,
    JobQueueCapacity,
    WebhookTimeoutSecs,
    PairingErrorStatus,
    LogFormat,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::ApiKey => "API_KEY",
            EnvKey::StoragePath => "STORAGE_PATH",
            EnvKey::WhisperApiUrl => "WHISPER_API_URL",
            EnvKey::WhisperApiKey => "WHISPER_API_KEY",
            EnvKey::WhisperModel => "WHISPER_MODEL",
            EnvKey::WorkerCount => "WORKER_COUNT",
            EnvKey::JobQueueCapacity => "JOB_QUEUE_CAPACITY",
            EnvKey::WebhookTimeoutSecs => "WEBHOOK_TIMEOUT_SECS",
            EnvKey::PairingErrorStatus => "PAIRING_ERROR_STATUS",
            EnvKey::LogFormat => "LOG_FORMAT",
        }
    }
}

/// Process environment as a key -> value lookup.
pub fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

pub fn get(lookup: &impl Fn(&str) -> Option<String>, key: EnvKey) -> Result<String, env::VarError> {
    lookup(key.as_str()).ok_or(env::VarError::NotPresent)
}

pub fn get_or(lookup: &impl Fn(&str) -> Option<String>, key: EnvKey, default: &str) -> String {
    lookup(key.as_str()).unwrap_or_else(|| default.to_string())
}

pub fn get_parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: EnvKey, default: T) -> T {
    match get(lookup, key) {
        Ok(val) => val.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
