//! Helpers that fill the task templates from request values.

use super::tasks::{
    PRACTICE_CURRICULUM_SECTION, PRACTICE_MATERIALS_SECTION, PRACTICE_QUESTIONS_PROMPT,
    SMART_PROMPTS_PROMPT, STUDY_PLAN_ANALYSIS_SECTION, STUDY_PLAN_CLOSING,
    STUDY_PLAN_SITUATION_PROMPT, SYLLABUS_ANALYSIS_PROMPT,
};
use crate::types::StudyRequest;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("static placeholder pattern is valid"));

/// Substitutes every `{name}` in `template` in one pass. Substituted values
/// are never rescanned; unknown placeholders are left as written.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// The stage-1 prompt: the full syllabus text plus the analysis instructions.
pub fn syllabus_analysis_prompt(syllabus_text: &str, subject: &str) -> String {
    fill(
        SYLLABUS_ANALYSIS_PROMPT,
        &[("syllabus_text", syllabus_text), ("subject", subject)],
    )
}

/// The `SYLLABUS ANALYSIS:` block, or an empty string without an analysis.
pub fn analysis_section(analysis: Option<&str>) -> String {
    match analysis {
        Some(analysis) if !analysis.trim().is_empty() => {
            fill(STUDY_PLAN_ANALYSIS_SECTION, &[("analysis", analysis)])
        }
        _ => String::new(),
    }
}

/// The stage-2 prompt: situation, optional analysis, closing instructions.
pub fn study_plan_prompt(request: &StudyRequest, analysis: Option<&str>) -> String {
    let days_left = request.days_left().to_string();
    let hours_per_day = request.hours_per_day().to_string();
    let situation = fill(
        STUDY_PLAN_SITUATION_PROMPT,
        &[
            ("subject", request.subject()),
            ("days_left", &days_left),
            ("hours_per_day", &hours_per_day),
            ("resource_type", request.resource_type().label()),
            ("learning_preference", request.learning_preference().label()),
        ],
    );

    format!(
        "{situation}{}{STUDY_PLAN_CLOSING}",
        analysis_section(analysis)
    )
}

/// Grounds the questions in the materials when there are any, otherwise in the
/// standard curriculum.
pub fn materials_section(materials: Option<&str>) -> String {
    match materials {
        Some(materials) => fill(PRACTICE_MATERIALS_SECTION, &[("materials", materials)]),
        None => PRACTICE_CURRICULUM_SECTION.to_string(),
    }
}

pub fn practice_questions_prompt(subject: &str, topic: &str, materials: Option<&str>) -> String {
    let base = fill(
        PRACTICE_QUESTIONS_PROMPT,
        &[("topic", topic), ("subject", subject)],
    );
    format!("{base}{}", materials_section(materials))
}

pub fn smart_prompts_prompt(subject: &str, topic: &str) -> String {
    fill(SMART_PROMPTS_PROMPT, &[("topic", topic), ("subject", subject)])
}
