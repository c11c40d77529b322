//! # Interaction and Feedback Logs
//!
//! Append-only CSV files. The header is written when a file is first created,
//! free-text fields are sanitized so every record keeps its column count, and
//! appends through one log value are serialized behind a mutex.

use crate::{
    errors::{LogError, ValidationError},
    prompts::tasks::FEEDBACK_THANKS_MESSAGE,
    types::StudyRequest,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    str::FromStr,
    sync::{Arc, Mutex},
};
use tracing::debug;

pub const INTERACTIONS_FILE: &str = "user_interactions.csv";
pub const FEEDBACK_FILE: &str = "user_feedback.csv";

pub const INTERACTION_HEADER: &[&str] = &[
    "timestamp",
    "subject",
    "days_left",
    "hours_per_day",
    "resource_type",
    "feedback_preference",
];
pub const FEEDBACK_HEADER: &[&str] = &["timestamp", "feedback_type", "feedback_text", "plan_details"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Replaces commas with `;` and newlines with a space.
pub fn sanitize(text: &str) -> String {
    text.replace(',', ";").replace("\r\n", " ").replace(['\n', '\r'], " ")
}

fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// How helpful the user found a generated plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackKind {
    #[serde(rename = "Very Helpful")]
    VeryHelpful,
    #[serde(rename = "Somewhat Helpful")]
    SomewhatHelpful,
    #[serde(rename = "Not Helpful")]
    NotHelpful,
}

impl FeedbackKind {
    pub fn all() -> [FeedbackKind; 3] {
        [
            FeedbackKind::VeryHelpful,
            FeedbackKind::SomewhatHelpful,
            FeedbackKind::NotHelpful,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedbackKind::VeryHelpful => "Very Helpful",
            FeedbackKind::SomewhatHelpful => "Somewhat Helpful",
            FeedbackKind::NotHelpful => "Not Helpful",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FeedbackKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('_', " ");
        Self::all()
            .into_iter()
            .find(|kind| kind.label().to_lowercase() == needle)
            .ok_or_else(|| ValidationError::UnknownFeedbackType(s.to_string()))
    }
}

/// One CSV file with a fixed header.
#[derive(Debug)]
struct CsvLog {
    path: PathBuf,
    header: &'static [&'static str],
    lock: Mutex<()>,
}

impl CsvLog {
    fn new(path: PathBuf, header: &'static [&'static str]) -> Self {
        Self {
            path,
            header,
            lock: Mutex::new(()),
        }
    }

    fn append(&self, record: &[String]) -> Result<(), LogError> {
        let _guard = self.lock.lock().map_err(|_| LogError::Poisoned)?;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let needs_header = fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(self.header)?;
        }
        writer.write_record(record)?;
        writer.flush()?;

        debug!("Appended record to {}", self.path.display());
        Ok(())
    }
}

/// Records every generated study plan's parameters.
#[derive(Debug)]
pub struct InteractionLog {
    inner: CsvLog,
}

impl InteractionLog {
    /// A log stored as `user_interactions.csv` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            inner: CsvLog::new(dir.as_ref().join(INTERACTIONS_FILE), INTERACTION_HEADER),
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    pub fn record(&self, request: &StudyRequest) -> Result<(), LogError> {
        self.inner.append(&[
            timestamp(),
            sanitize(request.subject()),
            request.days_left().to_string(),
            request.hours_per_day().to_string(),
            sanitize(request.resource_type().label()),
            sanitize(request.learning_preference().label()),
        ])
    }

    /// Runs [`InteractionLog::record`] on the blocking thread pool.
    pub async fn record_blocking(self: Arc<Self>, request: StudyRequest) -> Result<(), LogError> {
        tokio::task::spawn_blocking(move || self.record(&request)).await?
    }
}

/// Records user feedback on generated plans.
#[derive(Debug)]
pub struct FeedbackLog {
    inner: CsvLog,
}

impl FeedbackLog {
    /// A log stored as `user_feedback.csv` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            inner: CsvLog::new(dir.as_ref().join(FEEDBACK_FILE), FEEDBACK_HEADER),
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Appends one feedback record and returns the thank-you message.
    pub fn save(
        &self,
        kind: FeedbackKind,
        feedback_text: &str,
        plan_details: &str,
    ) -> Result<&'static str, LogError> {
        self.inner.append(&[
            timestamp(),
            kind.label().to_string(),
            sanitize(feedback_text),
            sanitize(plan_details),
        ])?;
        Ok(FEEDBACK_THANKS_MESSAGE)
    }

    /// Runs [`FeedbackLog::save`] on the blocking thread pool.
    pub async fn save_blocking(
        self: Arc<Self>,
        kind: FeedbackKind,
        feedback_text: String,
        plan_details: String,
    ) -> Result<&'static str, LogError> {
        tokio::task::spawn_blocking(move || self.save(kind, &feedback_text, &plan_details)).await?
    }
}
