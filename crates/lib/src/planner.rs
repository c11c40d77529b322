//! # Plan Synthesizer
//!
//! Stage two of the study-plan flow: one completion built from the request
//! scalars and, when present, the syllabus analysis.

use crate::{
    analyzer::SyllabusAnalysis, completion::CompletionClient, errors::PromptError,
    prompts::core::study_plan_prompt, types::StudyRequest,
};
use tracing::info;

/// The plan text together with the prompt that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedPlan {
    pub prompt: String,
    pub text: String,
}

/// Builds the plan prompt. At most one analysis section is included.
pub fn build_plan_prompt(request: &StudyRequest, analysis: Option<&SyllabusAnalysis>) -> String {
    study_plan_prompt(request, analysis.map(SyllabusAnalysis::as_str))
}

pub async fn synthesize(
    client: &CompletionClient,
    request: &StudyRequest,
    analysis: Option<&SyllabusAnalysis>,
) -> Result<SynthesizedPlan, PromptError> {
    info!(
        subject = request.subject(),
        with_analysis = analysis.is_some(),
        "Synthesizing study plan"
    );
    let prompt = build_plan_prompt(request, analysis);
    let text = client.complete(&prompt).await?;
    Ok(SynthesizedPlan { prompt, text })
}
