use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{JobError, TranscriptionError};

pub const TRANSCRIBE_ENDPOINT: &str = "/transcribe";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Transcript,
    Srt,
}

impl FromStr for OutputFormat {
    type Err = TranscriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "transcript" => Ok(OutputFormat::Transcript),
            "srt" => Ok(OutputFormat::Srt),
            _ => Err(TranscriptionError::InvalidOutputFormat),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Transcript => write!(f, "transcript"),
            OutputFormat::Srt => write!(f, "srt"),
        }
    }
}

/// Caller-supplied token echoed verbatim in the webhook payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrelationId {
    Text(String),
    Number(serde_json::Number),
}

impl CorrelationId {
    /// Empty strings and numeric zero are treated as not supplied.
    pub fn is_blank(&self) -> bool {
        match self {
            CorrelationId::Text(s) => s.is_empty(),
            CorrelationId::Number(n) => n.as_f64() == Some(0.0),
        }
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationId::Text(s) => write!(f, "{}", s),
            CorrelationId::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Callback {
    pub webhook_url: String,
    pub correlation_id: CorrelationId,
}

/// A request that passed shape validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionRequest {
    pub media_url: String,
    /// Raw selector; parsed when the job runs so a bad value fails the job.
    pub output: String,
    pub callback: Option<Callback>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobMode {
    Synchronous,
    Asynchronous,
}

impl fmt::Display for JobMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobMode::Synchronous => write!(f, "synchronous"),
            JobMode::Asynchronous => write!(f, "asynchronous"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub request: TranscriptionRequest,
}

impl Job {
    pub fn new(request: TranscriptionRequest) -> Self {
        Self {
            id: JobId::new(),
            request,
        }
    }

    pub fn mode(&self) -> JobMode {
        if self.request.callback.is_some() {
            JobMode::Asynchronous
        } else {
            JobMode::Synchronous
        }
    }
}

pub type TranscriptionResult = Result<String, JobError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub endpoint: String,
    pub id: CorrelationId,
    pub response: Option<String>,
    pub code: u16,
    pub message: String,
}

impl NotificationPayload {
    pub fn success(id: CorrelationId, content: String) -> Self {
        Self {
            endpoint: TRANSCRIBE_ENDPOINT.to_string(),
            id,
            response: Some(content),
            code: 200,
            message: "success".to_string(),
        }
    }

    pub fn failure(id: CorrelationId, message: String) -> Self {
        Self {
            endpoint: TRANSCRIBE_ENDPOINT.to_string(),
            id,
            response: None,
            code: 500,
            message,
        }
    }

    pub fn from_result(id: CorrelationId, result: TranscriptionResult) -> Self {
        match result {
            Ok(content) => Self::success(id, content),
            Err(e) => Self::failure(id, e.to_string()),
        }
    }
}
