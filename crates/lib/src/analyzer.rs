//! # Syllabus Analyzer
//!
//! Stage one of the study-plan flow: asks the model to list the syllabus
//! topics and pick the high-yield ones.

use crate::{
    completion::CompletionClient, errors::PromptError, extract::ExtractedText,
    prompts::core::syllabus_analysis_prompt,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, sync::LazyLock};
use tracing::{debug, info};

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:json)?\s*([\s\S]*?)```").expect("static fence pattern is valid")
});

/// The raw analysis text, exactly as the model returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SyllabusAnalysis(String);

/// The JSON shape the analysis prompt asks for.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StructuredAnalysis {
    #[serde(default)]
    pub all_topics: Vec<String>,
    #[serde(default)]
    pub high_priority_topics: Vec<String>,
    #[serde(default)]
    pub topic_importance: BTreeMap<String, String>,
}

impl SyllabusAnalysis {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort parse of the analysis as JSON, optionally inside a fenced
    /// code block. Returns `None` when the model did not follow the format.
    pub fn structured(&self) -> Option<StructuredAnalysis> {
        let body = FENCED_BLOCK
            .captures(&self.0)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or(&self.0)
            .trim();

        let start = body.find('{')?;
        let end = body.rfind('}')?;
        if end < start {
            return None;
        }
        serde_json::from_str(&body[start..=end]).ok()
    }
}

impl fmt::Display for SyllabusAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Runs the analysis when the extraction produced usable text.
///
/// Returns `Ok(None)` without calling the model for absent, unsupported,
/// failed or too-short extractions.
pub async fn analyze(
    client: &CompletionClient,
    extracted: &ExtractedText,
    subject: &str,
) -> Result<Option<SyllabusAnalysis>, PromptError> {
    let Some(text) = extracted.usable_text() else {
        debug!("No usable syllabus text; skipping analysis.");
        return Ok(None);
    };

    info!("Analyzing syllabus for '{}'", subject);
    let prompt = syllabus_analysis_prompt(text, subject);
    let response = client.complete(&prompt).await?;
    Ok(Some(SyllabusAnalysis::new(response)))
}
