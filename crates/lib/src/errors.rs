use std::time::Duration;
use thiserror::Error;

/// Errors raised while talking to an AI provider.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned status {status}: {body}")]
    AiStatus { status: u16, body: String },
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider did not answer within {0:?}")]
    Timeout(Duration),
    #[error("AI provider is not configured: {0}")]
    MissingAiProvider(String),
}

impl PromptError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Transport failures, timeouts, rate limits and server-side errors are
    /// transient. Everything else (bad keys, malformed bodies, configuration)
    /// will fail the same way on every attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            PromptError::AiRequest(_) | PromptError::Timeout(_) => true,
            PromptError::AiStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Rejections raised while building a request from user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Subject must not be empty")]
    EmptySubject,
    #[error("days_left must be between {min} and {max}, got {value}")]
    DaysLeftOutOfRange { value: u32, min: u32, max: u32 },
    #[error("hours_per_day must be between {min} and {max}, got {value}")]
    HoursPerDayOutOfRange { value: u32, min: u32, max: u32 },
    #[error("Unknown resource type: '{0}'")]
    UnknownResourceType(String),
    #[error("Unknown learning preference: '{0}'")]
    UnknownLearningPreference(String),
    #[error("Unknown feedback type: '{0}'")]
    UnknownFeedbackType(String),
}

/// Errors raised by the flat-file interaction and feedback logs.
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Log I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Log writer lock was poisoned")]
    Poisoned,
    #[error("Log write task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
