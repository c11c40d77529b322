//! # Application Configuration
//!
//! Defines the configuration structure for `codelala-server` and loads it from
//! a YAML file layered with environment variables.

use codelala::{
    prompts::tasks::STUDY_PLANNER_PERSONA, ProviderConfig, RelevanceGate, RetryPolicy,
};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::{collections::HashMap, env, fs, path::Path, sync::LazyLock};
use thiserror::Error;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    #[error("Configuration error: {0}")]
    General(String),
    /// Indicates a required configuration file was not found.
    #[error("{0}")]
    NotFound(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// Which provider the assistant uses, and its persona.
#[derive(Debug, Deserialize, Clone)]
pub struct AssistantConfig {
    /// The key of the provider to use from the `providers` map.
    pub provider: String,
    /// Overrides the default study-planner persona.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding `user_interactions.csv`.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// Directory holding `user_feedback.csv`.
    #[serde(default = "default_feedback_dir")]
    pub feedback_dir: String,
    /// Upper bound for multipart request bodies.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// A map of named, reusable AI provider configurations.
    pub providers: HashMap<String, ProviderConfig>,
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub retry: RetryPolicy,
    #[serde(default)]
    pub relevance: RelevanceGate,
}

fn default_port() -> u16 {
    9090
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_feedback_dir() -> String {
    "feedback".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").expect("static placeholder pattern is valid")
});

// Reads a file and substitutes `${VAR}` placeholders from the environment.
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let expanded_content = ENV_PLACEHOLDER.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// - Top-level keys like `port` and `log_dir` are overridden by `PORT` and `LOG_DIR`.
/// - Nested keys are overridden by `CODELALA_...` variables (e.g.
///   `CODELALA_RETRY__MAX_ATTEMPTS`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults from the library.
        .set_default("assistant.system_prompt", STUDY_PLANNER_PERSONA)?;

    // Layer 2: Main Config (with Fallback)
    let main_config_path = if let Some(override_path) = config_path_override {
        override_path.to_string()
    } else {
        let user_config_path = format!("{base_path}/config.yml");
        if Path::new(&user_config_path).exists() {
            info!("Loading user-defined configuration from '{user_config_path}'.");
            user_config_path
        } else {
            let provider = env::var("AI_PROVIDER").unwrap_or_else(|_| "gemini".to_string());
            let fallback_path = format!("{base_path}/config.{provider}.yml");
            info!("'{user_config_path}' not found. Falling back to '{fallback_path}' based on AI_PROVIDER='{provider}'.");
            fallback_path
        }
    };

    let main_content = read_and_substitute(&main_config_path)?
        .ok_or_else(|| ConfigError::NotFound(format!("Main config file not found at '{main_config_path}'. Please ensure 'config.yml' exists or your AI_PROVIDER is set to load a valid template ('local' or 'gemini').")))?;
    builder = builder.add_source(File::from_str(&main_content, FileFormat::Yaml));

    let settings = builder
        // Layer 3: Load environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 4: Load prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("CODELALA")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;

    if !config.providers.contains_key(&config.assistant.provider) {
        return Err(ConfigError::General(format!(
            "Assistant provider '{}' is not defined in 'providers'.",
            config.assistant.provider
        )));
    }

    Ok(config)
}
