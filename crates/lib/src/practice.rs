//! # Practice Questions and Smart Prompts
//!
//! The two single-stage generation paths. Practice questions pass through the
//! [`RelevanceGate`] first; smart prompts do not.

use crate::{
    completion::CompletionClient,
    errors::PromptError,
    extract::{extract_document_blocking, ExtractedText, MATERIALS_KINDS},
    gate::RelevanceGate,
    prompts::{
        core::{practice_questions_prompt, smart_prompts_prompt},
        tasks::{EMPTY_TOPIC_MESSAGE, NOT_ACADEMIC_MESSAGE},
    },
    types::PracticeRequest,
};
use serde::Serialize;
use tracing::info;

/// Why a practice request was turned away before any model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclineReason {
    EmptyTopic,
    NotAcademic,
}

impl DeclineReason {
    pub fn message(&self) -> &'static str {
        match self {
            DeclineReason::EmptyTopic => EMPTY_TOPIC_MESSAGE,
            DeclineReason::NotAcademic => NOT_ACADEMIC_MESSAGE,
        }
    }
}

/// The result of a practice-question request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PracticeOutcome {
    Generated {
        text: String,
        #[serde(skip)]
        prompt: String,
        #[serde(skip)]
        materials: ExtractedText,
    },
    Declined {
        reason: DeclineReason,
        message: String,
    },
}

impl PracticeOutcome {
    fn declined(reason: DeclineReason) -> Self {
        PracticeOutcome::Declined {
            reason,
            message: reason.message().to_string(),
        }
    }

    /// The text to show the user: the questions or the decline message.
    pub fn text(&self) -> &str {
        match self {
            PracticeOutcome::Generated { text, .. } => text,
            PracticeOutcome::Declined { message, .. } => message,
        }
    }

    pub fn is_declined(&self) -> bool {
        matches!(self, PracticeOutcome::Declined { .. })
    }
}

/// Checks the request against the gate. Reads no files.
pub fn screen(gate: &RelevanceGate, request: &PracticeRequest) -> Option<DeclineReason> {
    let topic = request.topic.trim();
    if topic.is_empty() {
        return Some(DeclineReason::EmptyTopic);
    }
    if !gate.is_academic(&request.subject, topic) {
        return Some(DeclineReason::NotAcademic);
    }
    None
}

pub async fn generate_practice(
    client: &CompletionClient,
    gate: &RelevanceGate,
    request: PracticeRequest,
) -> Result<PracticeOutcome, PromptError> {
    if let Some(reason) = screen(gate, &request) {
        info!(?reason, "Practice request declined");
        return Ok(PracticeOutcome::declined(reason));
    }

    let PracticeRequest {
        subject,
        topic,
        materials,
    } = request;
    let materials = extract_document_blocking(materials, MATERIALS_KINDS).await;

    let prompt = practice_questions_prompt(&subject, topic.trim(), materials.usable_text());
    info!(
        subject = %subject,
        grounded = materials.usable_text().is_some(),
        "Generating practice questions"
    );
    let text = client.complete(&prompt).await?;
    Ok(PracticeOutcome::Generated {
        text,
        prompt,
        materials,
    })
}

pub async fn generate_prompts(
    client: &CompletionClient,
    subject: &str,
    topic: &str,
) -> Result<String, PromptError> {
    info!(subject, topic, "Generating smart prompts");
    let prompt = smart_prompts_prompt(subject, topic);
    client.complete(&prompt).await
}
