//! # Study Assistant Pipeline Tests
//!
//! Drives every generation path through `StudyAssistant` with a recording
//! `MockAiProvider`, checking which prompts are sent and how many.

use codelala::{
    extract::{ExtractedText, UploadedDocument},
    planner::build_plan_prompt,
    prompts::tasks::{EMPTY_TOPIC_MESSAGE, NOT_ACADEMIC_MESSAGE, STUDY_PLANNER_PERSONA},
    DeclineReason, LearningPreference, RelevanceGate, PlanStage, PracticeOutcome, PracticeRequest, PromptError,
    ResourceType, RetryPolicy, StudyAssistant, StudyRequest, SyllabusAnalysis,
};
use codelala_test_utils::{helpers::generate_test_pdf, MockAiProvider};
use std::fs;
use tempfile::{tempdir, TempDir};

const ANALYSIS_KEY: &str = "SYLLABUS CONTENT:";
const MOCK_ANALYSIS: &str = r#"{"all_topics": ["Processes", "Paging"], "high_priority_topics": ["Paging"], "topic_importance": {"Paging": "asked every year"}}"#;
const MOCK_PLAN: &str = "Day 1: Paging. Day 2: Scheduling. Day 3: Revision.";

fn assistant(mock: &MockAiProvider) -> StudyAssistant {
    StudyAssistant::builder()
        .ai_provider(Box::new(mock.clone()))
        .retry_policy(RetryPolicy::none())
        .build()
        .unwrap()
}

fn plan_mock() -> MockAiProvider {
    let mock = MockAiProvider::answering(MOCK_PLAN);
    mock.add_response(ANALYSIS_KEY, MOCK_ANALYSIS);
    mock
}

fn os_request(syllabus: Option<UploadedDocument>) -> StudyRequest {
    StudyRequest::new(
        "Operating Systems (OS)",
        3,
        4,
        ResourceType::Textbooks,
        "Visual learner".parse::<LearningPreference>().unwrap(),
        syllabus,
    )
    .unwrap()
}

fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> UploadedDocument {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    UploadedDocument::new(path)
}

fn long_syllabus_pdf(dir: &TempDir) -> UploadedDocument {
    let pdf = generate_test_pdf(&[
        "Unit 1: Processes, threads and CPU scheduling algorithms.",
        "Unit 2: Memory management, paging, segmentation and virtual memory.",
        "Unit 3: File systems, disk scheduling and I/O management.",
    ])
    .unwrap();
    write_file(dir, "syllabus.pdf", &pdf)
}

/// No file: one completion, all four scalars present, no analysis section.
#[tokio::test]
async fn test_plan_without_syllabus_makes_one_call() {
    let mock = plan_mock();
    let result = assistant(&mock)
        .generate_study_plan(&os_request(None))
        .await
        .unwrap();

    assert_eq!(result.text, MOCK_PLAN);
    assert!(result.analysis.is_none());
    assert_eq!(result.extraction, ExtractedText::Absent);
    assert_eq!(
        result.stages,
        vec![PlanStage::Idle, PlanStage::SynthesizingPlan, PlanStage::Done]
    );

    let calls = mock.get_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].system_prompt, STUDY_PLANNER_PERSONA);

    let prompt = &calls[0].user_prompt;
    assert_eq!(prompt, &result.prompt);
    assert!(prompt.contains("Subject: Operating Systems (OS)"));
    assert!(prompt.contains("Days remaining until exam: 3"));
    assert!(prompt.contains("Available study hours per day: 4"));
    assert!(prompt.contains("Primary study resource: Textbooks"));
    assert!(prompt.contains("Learning preference: Visual learner (diagrams, charts)"));
    assert!(!prompt.contains("SYLLABUS ANALYSIS"));
}

/// A syllabus with enough text is analyzed first, and the analysis is folded
/// into the plan prompt exactly once, before the closing instructions.
#[tokio::test]
async fn test_plan_with_syllabus_runs_both_stages() {
    let dir = tempdir().unwrap();
    let mock = plan_mock();
    let request = os_request(Some(long_syllabus_pdf(&dir)));

    let result = assistant(&mock).generate_study_plan(&request).await.unwrap();

    assert_eq!(result.completion_calls(), 2);
    assert_eq!(
        result.stages,
        vec![
            PlanStage::Idle,
            PlanStage::ExtractingText,
            PlanStage::AnalyzingSyllabus,
            PlanStage::SynthesizingPlan,
            PlanStage::Done,
        ]
    );
    assert_eq!(
        result.analysis.as_ref().map(SyllabusAnalysis::as_str),
        Some(MOCK_ANALYSIS)
    );

    let calls = mock.get_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].user_prompt.contains("Paging") || calls[0].user_prompt.contains("paging"));
    assert!(calls[0].user_prompt.contains("Based on this syllabus for Operating Systems (OS)"));

    let plan_prompt = &calls[1].user_prompt;
    assert_eq!(plan_prompt.matches("SYLLABUS ANALYSIS:").count(), 1);
    assert!(plan_prompt.contains(MOCK_ANALYSIS));
    let analysis_at = plan_prompt.find("SYLLABUS ANALYSIS:").unwrap();
    let closing_at = plan_prompt
        .find("Please provide a comprehensive study plan")
        .unwrap();
    assert!(analysis_at < closing_at);
}

#[tokio::test]
async fn test_short_syllabus_skips_analysis() {
    let dir = tempdir().unwrap();
    let mock = plan_mock();
    let syllabus = write_file(&dir, "tiny.pdf", &generate_test_pdf(&["Unit 1: Paging"]).unwrap());

    let result = assistant(&mock)
        .generate_study_plan(&os_request(Some(syllabus)))
        .await
        .unwrap();

    assert!(result.extraction.text().is_some());
    assert!(result.analysis.is_none());
    assert_eq!(mock.call_count(), 1);
    assert_eq!(
        result.stages,
        vec![
            PlanStage::Idle,
            PlanStage::ExtractingText,
            PlanStage::SynthesizingPlan,
            PlanStage::Done,
        ]
    );
}

/// A failed extraction never reaches the analyzer; its message never reaches a prompt.
#[tokio::test]
async fn test_corrupt_syllabus_falls_back_to_plain_plan() {
    let dir = tempdir().unwrap();
    let mock = plan_mock();
    let syllabus = write_file(&dir, "broken.pdf", "not a pdf ".repeat(30).as_bytes());

    let result = assistant(&mock)
        .generate_study_plan(&os_request(Some(syllabus)))
        .await
        .unwrap();

    assert!(matches!(result.extraction, ExtractedText::Failed { .. }));
    assert_eq!(mock.call_count(), 1);
    assert!(!mock.get_calls()[0].user_prompt.contains("Error extracting text"));
}

#[tokio::test]
async fn test_provider_error_propagates() {
    let mock = MockAiProvider::new();
    let err = assistant(&mock)
        .generate_study_plan(&os_request(None))
        .await
        .unwrap_err();
    assert!(matches!(err, PromptError::AiApi(_)));
}

#[tokio::test]
async fn test_transient_failure_is_retried_by_assistant() {
    let mock = MockAiProvider::answering(MOCK_PLAN).fail_next(1, 503);
    let assistant = StudyAssistant::builder()
        .ai_provider(Box::new(mock.clone()))
        .retry_policy(RetryPolicy {
            max_attempts: 2,
            initial_backoff_ms: 1,
            backoff_multiplier: 1.0,
            max_backoff_ms: 1,
            timeout_ms: 0,
        })
        .build()
        .unwrap();

    let result = assistant.generate_study_plan(&os_request(None)).await.unwrap();
    assert_eq!(result.text, MOCK_PLAN);
    assert_eq!(mock.call_count(), 2);
}

#[test]
fn test_builder_applies_persona_retry_and_gate() {
    let retry = RetryPolicy {
        max_attempts: 4,
        ..RetryPolicy::default()
    };
    let gate = RelevanceGate::new(vec!["baking".to_string()], vec![]);
    let assistant = StudyAssistant::builder()
        .ai_provider(Box::new(MockAiProvider::answering("ok")))
        .system_prompt("You are a terse tutor.")
        .retry_policy(retry)
        .relevance_gate(gate)
        .build()
        .unwrap();

    assert_eq!(assistant.completion_client().persona(), "You are a terse tutor.");
    assert_eq!(assistant.completion_client().retry_policy(), &retry);
    assert!(assistant.relevance_gate().is_academic("Cooking", "baking bread"));
    assert!(!assistant.relevance_gate().is_academic("Operating Systems (OS)", "paging"));

    let defaults = assistant_defaults();
    assert_eq!(defaults.completion_client().persona(), STUDY_PLANNER_PERSONA);
    assert_eq!(defaults.completion_client().retry_policy(), &RetryPolicy::default());
}

fn assistant_defaults() -> StudyAssistant {
    StudyAssistant::builder()
        .ai_provider(Box::new(MockAiProvider::answering("ok")))
        .build()
        .unwrap()
}

#[test]
fn test_builder_requires_provider() {
    assert!(matches!(
        StudyAssistant::builder().build(),
        Err(PromptError::MissingAiProvider(_))
    ));
}

#[test]
fn test_plan_prompt_has_at_most_one_analysis_section() {
    let request = os_request(None);
    let analysis = SyllabusAnalysis::new("Paging is high priority.");

    let without = build_plan_prompt(&request, None);
    let with = build_plan_prompt(&request, Some(&analysis));

    assert!(!without.contains("SYLLABUS ANALYSIS:"));
    assert_eq!(with.matches("SYLLABUS ANALYSIS:").count(), 1);
    assert!(with.ends_with("visually organized structure."));
}

// --- Practice questions ---

#[tokio::test]
async fn test_non_academic_practice_is_declined_without_a_call() {
    let mock = MockAiProvider::answering("questions");
    let outcome = assistant(&mock)
        .generate_practice_questions(PracticeRequest::new("Cooking", "pasta recipes", None))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PracticeOutcome::Declined {
            reason: DeclineReason::NotAcademic,
            message: NOT_ACADEMIC_MESSAGE.to_string(),
        }
    );
    assert_eq!(mock.call_count(), 0);
}

/// A blank topic is declined before the materials are even opened.
#[tokio::test]
async fn test_blank_topic_is_declined_without_a_call() {
    let mock = MockAiProvider::answering("questions");
    let materials = UploadedDocument::new("/missing/notes.txt");
    let outcome = assistant(&mock)
        .generate_practice_questions(PracticeRequest::new(
            "Operating Systems (OS)",
            "   ",
            Some(materials),
        ))
        .await
        .unwrap();

    assert!(outcome.is_declined());
    assert_eq!(outcome.text(), EMPTY_TOPIC_MESSAGE);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_practice_is_grounded_in_materials() {
    let dir = tempdir().unwrap();
    let notes = "Deadlock requires mutual exclusion, hold and wait, no preemption and circular wait. \
                 The banker's algorithm avoids deadlock by simulating allocation.";
    let materials = write_file(&dir, "notes.txt", notes.as_bytes());
    let mock = MockAiProvider::answering("Q1. ...");

    let outcome = assistant(&mock)
        .generate_practice_questions(PracticeRequest::new(
            "Operating Systems (OS)",
            "Deadlocks",
            Some(materials),
        ))
        .await
        .unwrap();

    assert_eq!(outcome.text(), "Q1. ...");
    let prompt = &mock.get_calls()[0].user_prompt;
    assert!(prompt.contains("Create 5 high-quality practice questions for the topic 'Deadlocks'"));
    assert!(prompt.contains("BASE YOUR QUESTIONS ON THE FOLLOWING MATERIALS:"));
    assert!(prompt.contains("banker's algorithm"));
    assert!(!prompt.contains("standard curriculum"));
}

#[tokio::test]
async fn test_practice_without_materials_uses_curriculum() {
    let mock = MockAiProvider::answering("Q1. ...");
    assistant(&mock)
        .generate_practice_questions(PracticeRequest::new("Maths", "integral calculus", None))
        .await
        .unwrap();

    let prompt = &mock.get_calls()[0].user_prompt;
    assert!(prompt.contains("Focus on standard curriculum content"));
    assert!(!prompt.contains("BASE YOUR QUESTIONS"));
}

/// The docx advisory is not document text and is never used as materials.
#[tokio::test]
async fn test_docx_materials_do_not_ground_the_prompt() {
    let dir = tempdir().unwrap();
    let materials = write_file(&dir, "notes.docx", b"PK\x03\x04");
    let mock = MockAiProvider::answering("Q1. ...");

    let outcome = assistant(&mock)
        .generate_practice_questions(PracticeRequest::new(
            "Computer Networks (CN)",
            "routing protocols",
            Some(materials),
        ))
        .await
        .unwrap();

    let PracticeOutcome::Generated { materials, .. } = outcome else {
        panic!("expected generated questions");
    };
    assert!(matches!(materials, ExtractedText::Unsupported { .. }));
    let prompt = &mock.get_calls()[0].user_prompt;
    assert!(!prompt.contains("DOCX file detected"));
    assert!(prompt.contains("Focus on standard curriculum content"));
}

// --- Smart prompts ---

#[tokio::test]
async fn test_smart_prompts_skip_the_gate() {
    let mock = MockAiProvider::answering("1. Explain like I'm five");
    let text = assistant(&mock)
        .generate_smart_prompts("Cooking", "pasta recipes")
        .await
        .unwrap();

    assert_eq!(text, "1. Explain like I'm five");
    let calls = mock.get_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0]
        .user_prompt
        .contains("Generate 5 effective prompts that a student can use to ask ChatGPT/Gemini about the topic 'pasta recipes' in 'Cooking'"));
}
