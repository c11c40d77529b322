//! # Completion Client
//!
//! Sends the fixed study-planner persona plus one user prompt to the configured
//! [`AiProvider`] and returns the raw completion text. Every call goes through
//! a [`RetryPolicy`].

use crate::{errors::PromptError, prompts::tasks::STUDY_PLANNER_PERSONA, providers::ai::AiProvider};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// How transient provider failures are retried.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Values below 1 behave as 1.
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_ms: u64,
    /// Per-attempt timeout. `0` disables it.
    pub timeout_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 500,
            backoff_multiplier: 2.0,
            max_backoff_ms: 8_000,
            timeout_ms: 60_000,
        }
    }
}

impl RetryPolicy {
    /// A single attempt with no timeout.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff_ms: 0,
            backoff_multiplier: 1.0,
            max_backoff_ms: 0,
            timeout_ms: 0,
        }
    }

    /// The delay before retry number `retry` (1-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = self.backoff_multiplier.max(1.0).powi(retry.saturating_sub(1) as i32);
        let millis = (self.initial_backoff_ms as f64 * factor).min(self.max_backoff_ms as f64);
        Duration::from_millis(millis as u64)
    }

    fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

/// A stateless two-message completion client.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    provider: Box<dyn AiProvider>,
    persona: String,
    retry: RetryPolicy,
}

impl CompletionClient {
    pub fn new(provider: Box<dyn AiProvider>) -> Self {
        Self {
            provider,
            persona: STUDY_PLANNER_PERSONA.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Sends `user_prompt` with the persona and returns the completion text.
    #[instrument(skip_all, fields(prompt_chars = user_prompt.chars().count()))]
    pub async fn complete(&self, user_prompt: &str) -> Result<String, PromptError> {
        debug!(user_prompt = %user_prompt, "--> Sending prompt to AI provider");

        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.attempt(user_prompt).await {
                Ok(text) => {
                    debug!("<-- Completion received ({} chars)", text.chars().count());
                    return Ok(text);
                }
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    let delay = self.retry.backoff(attempt);
                    warn!(
                        "Attempt {}/{} failed: {}. Retrying in {:?}.",
                        attempt, max_attempts, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!("Completion failed after {} attempt(s): {}", attempt, e);
                    return Err(e);
                }
            }
        }
    }

    async fn attempt(&self, user_prompt: &str) -> Result<String, PromptError> {
        let call = self.provider.generate(&self.persona, user_prompt);
        match self.retry.timeout() {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| PromptError::Timeout(limit))?,
            None => call.await,
        }
    }
}
