//! # Application State
//!
//! The shared, read-only application state and the logic for building it at
//! startup: one `StudyAssistant` plus the two flat-file logs.

use crate::config::AppConfig;
use codelala::{
    providers::factory::create_provider, FeedbackLog, InteractionLog, StudyAssistant,
};
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    pub assistant: Arc<StudyAssistant>,
    pub interactions: Arc<InteractionLog>,
    pub feedback: Arc<FeedbackLog>,
}

/// Builds the shared application state from the configuration.
///
/// Instantiates the provider named by `assistant.provider` and wires it into a
/// `StudyAssistant` with the configured persona, retry policy and relevance
/// lists.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let provider_name = &config.assistant.provider;
    let provider_config = config.providers.get(provider_name).ok_or_else(|| {
        anyhow::anyhow!("Provider '{provider_name}' not found in providers map.")
    })?;
    let ai_provider = create_provider(provider_name, provider_config)?;

    let mut builder = StudyAssistant::builder()
        .ai_provider(ai_provider)
        .retry_policy(config.retry)
        .relevance_gate(config.relevance.clone());
    if let Some(system_prompt) = &config.assistant.system_prompt {
        builder = builder.system_prompt(system_prompt.clone());
    }
    let assistant = builder.build()?;

    info!(
        provider = %provider_name,
        log_dir = %config.log_dir,
        feedback_dir = %config.feedback_dir,
        "Application state ready"
    );

    Ok(AppState {
        interactions: Arc::new(InteractionLog::in_dir(&config.log_dir)),
        feedback: Arc::new(FeedbackLog::in_dir(&config.feedback_dir)),
        assistant: Arc::new(assistant),
        config: Arc::new(config),
    })
}
