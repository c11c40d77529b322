//! # Study Assistant
//!
//! The orchestrator for every generation path. A `StudyAssistant` is built once
//! with [`StudyAssistantBuilder`] and shared read-only across requests.

use crate::{
    analyzer::{analyze, SyllabusAnalysis},
    completion::{CompletionClient, RetryPolicy},
    errors::PromptError,
    extract::{extract_document_blocking, ExtractedText, SYLLABUS_KINDS},
    gate::RelevanceGate,
    planner::synthesize,
    practice::{generate_practice, generate_prompts, PracticeOutcome},
    prompts::tasks::STUDY_PLANNER_PERSONA,
    providers::ai::AiProvider,
    types::{PracticeRequest, StudyRequest},
};
use serde::Serialize;
use tracing::{info, instrument};

/// The stages of the study-plan flow, in the order they can be visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStage {
    Idle,
    ExtractingText,
    AnalyzingSyllabus,
    SynthesizingPlan,
    Done,
}

/// A generated study plan and how it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct PlanResult {
    pub text: String,
    pub prompt: String,
    pub analysis: Option<SyllabusAnalysis>,
    pub extraction: ExtractedText,
    pub stages: Vec<PlanStage>,
}

impl PlanResult {
    /// Number of completion calls the plan took.
    pub fn completion_calls(&self) -> usize {
        if self.analysis.is_some() { 2 } else { 1 }
    }
}

#[derive(Debug, Clone)]
pub struct StudyAssistant {
    completion: CompletionClient,
    gate: RelevanceGate,
}

/// A builder for creating a `StudyAssistant`.
#[derive(Default)]
pub struct StudyAssistantBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    system_prompt: Option<String>,
    retry: Option<RetryPolicy>,
    gate: Option<RelevanceGate>,
}

impl StudyAssistantBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AI provider. Required.
    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    /// Replaces the default study-planner persona.
    pub fn system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn relevance_gate(mut self, gate: RelevanceGate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn build(self) -> Result<StudyAssistant, PromptError> {
        let provider = self
            .ai_provider
            .ok_or_else(|| PromptError::MissingAiProvider("no AI provider was set".to_string()))?;

        let completion = CompletionClient::new(provider)
            .with_persona(
                self.system_prompt
                    .unwrap_or_else(|| STUDY_PLANNER_PERSONA.to_string()),
            )
            .with_retry(self.retry.unwrap_or_default());

        Ok(StudyAssistant {
            completion,
            gate: self.gate.unwrap_or_default(),
        })
    }
}

impl StudyAssistant {
    pub fn builder() -> StudyAssistantBuilder {
        StudyAssistantBuilder::new()
    }

    pub fn completion_client(&self) -> &CompletionClient {
        &self.completion
    }

    pub fn relevance_gate(&self) -> &RelevanceGate {
        &self.gate
    }

    /// Generates a study plan, analyzing the syllabus first when it yields
    /// usable text.
    #[instrument(skip_all, fields(subject = request.subject()))]
    pub async fn generate_study_plan(
        &self,
        request: &StudyRequest,
    ) -> Result<PlanResult, PromptError> {
        let mut stages = vec![PlanStage::Idle];

        let extraction = match request.syllabus() {
            Some(syllabus) => {
                enter(&mut stages, PlanStage::ExtractingText);
                extract_document_blocking(Some(syllabus.clone()), SYLLABUS_KINDS).await
            }
            None => ExtractedText::Absent,
        };

        let analysis = if extraction.usable_text().is_some() {
            enter(&mut stages, PlanStage::AnalyzingSyllabus);
            analyze(&self.completion, &extraction, request.subject()).await?
        } else {
            None
        };

        enter(&mut stages, PlanStage::SynthesizingPlan);
        let plan = synthesize(&self.completion, request, analysis.as_ref()).await?;
        enter(&mut stages, PlanStage::Done);

        Ok(PlanResult {
            text: plan.text,
            prompt: plan.prompt,
            analysis,
            extraction,
            stages,
        })
    }

    /// Generates five practice questions, or declines without a model call.
    pub async fn generate_practice_questions(
        &self,
        request: PracticeRequest,
    ) -> Result<PracticeOutcome, PromptError> {
        generate_practice(&self.completion, &self.gate, request).await
    }

    /// Generates five prompts the student can ask an AI about a topic.
    pub async fn generate_smart_prompts(
        &self,
        subject: &str,
        topic: &str,
    ) -> Result<String, PromptError> {
        generate_prompts(&self.completion, subject, topic).await
    }
}

fn enter(stages: &mut Vec<PlanStage>, stage: PlanStage) {
    info!(?stage, "Study plan stage");
    stages.push(stage);
}
