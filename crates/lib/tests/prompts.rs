//! # Prompt Assembly Tests
//!
//! Validates the helpers in `codelala::prompts::core` that fill the task
//! templates from request values.

use codelala::{
    prompts::core::{
        analysis_section, materials_section, practice_questions_prompt, smart_prompts_prompt,
        fill, study_plan_prompt, syllabus_analysis_prompt,
    },
    LearningPreference, ResourceType, StudyRequest,
};

fn request() -> StudyRequest {
    StudyRequest::new(
        "Computer Networks (CN)",
        7,
        2,
        ResourceType::PreviousYearPapers,
        LearningPreference::Kinesthetic,
        None,
    )
    .unwrap()
}

#[test]
fn test_analysis_prompt_embeds_text_and_subject() {
    let prompt = syllabus_analysis_prompt("Unit 1: TCP/IP", "Computer Networks (CN)");
    assert!(prompt.contains("SYLLABUS CONTENT:\nUnit 1: TCP/IP"));
    assert!(prompt.contains("Based on this syllabus for Computer Networks (CN)"));
    assert!(prompt.contains("- all_topics: [list of all topics]"));
    assert!(prompt.contains("- high_priority_topics:"));
    assert!(prompt.contains(r#"- topic_importance: {"topic1": "reason for importance""#));
    assert!(!prompt.contains("{syllabus_text}"));
}

#[test]
fn test_plan_prompt_lists_every_scalar() {
    let prompt = study_plan_prompt(&request(), None);
    assert!(prompt.starts_with("As an expert educational assistant"));
    assert!(prompt.contains("- Subject: Computer Networks (CN)"));
    assert!(prompt.contains("- Days remaining until exam: 7"));
    assert!(prompt.contains("- Available study hours per day: 2"));
    assert!(prompt.contains("- Primary study resource: Previous year papers"));
    assert!(prompt.contains("- Learning preference: Kinesthetic learner (practice, examples)"));
    assert!(prompt.contains("5-minute breaks"));
    assert!(!prompt.contains('{'));
}

/// A blank analysis is treated as no analysis.
#[test]
fn test_blank_analysis_adds_no_section() {
    assert_eq!(analysis_section(None), "");
    assert_eq!(analysis_section(Some("  \n ")), "");
    assert!(analysis_section(Some("Paging first")).contains("SYLLABUS ANALYSIS:\nPaging first"));
}

#[test]
fn test_materials_section_switches_on_presence() {
    assert!(materials_section(Some("notes")).contains("BASE YOUR QUESTIONS ON THE FOLLOWING MATERIALS:\nnotes"));
    assert!(materials_section(None).contains("Focus on standard curriculum content"));
}

#[test]
fn test_practice_prompt_asks_for_solutions() {
    let prompt = practice_questions_prompt("DBMS", "Normalization", None);
    assert!(prompt.contains("topic 'Normalization' in the subject 'DBMS'"));
    assert!(prompt.contains("Provide a detailed solution"));
    assert!(prompt.contains("explanation of the key concept"));
}

#[test]
fn test_smart_prompts_prompt() {
    let prompt = smart_prompts_prompt("ML", "Gradient descent");
    assert!(prompt.contains("about the topic 'Gradient descent' in 'ML'"));
    assert!(prompt.contains("analogies or visualizations"));
}

/// Free-text subjects and topics are embedded verbatim, even when they look
/// like template placeholders.
#[test]
fn test_brace_tokens_in_user_text_are_kept_verbatim() {
    let request = StudyRequest::new(
        "Compilers {days_left} {resource_type}",
        3,
        4,
        ResourceType::Textbooks,
        LearningPreference::Visual,
        None,
    )
    .unwrap();
    let plan = study_plan_prompt(&request, None);
    assert!(plan.contains("- Subject: Compilers {days_left} {resource_type}\n"));
    assert!(plan.contains("Days remaining until exam: 3"));

    let practice = practice_questions_prompt("DBMS", "the {subject} keyword in SQL", None);
    assert!(practice.contains("topic 'the {subject} keyword in SQL' in the subject 'DBMS'"));

    let analysis = syllabus_analysis_prompt("x", "OS {syllabus_text}");
    assert!(analysis.contains("Based on this syllabus for OS {syllabus_text}"));
    assert_eq!(analysis.matches("SYLLABUS CONTENT:\nx\n").count(), 1);

    let prompts = smart_prompts_prompt("ML {topic}", "{subject} trees");
    assert!(prompts.contains("about the topic '{subject} trees' in 'ML {topic}'"));
}

#[test]
fn test_fill_leaves_unknown_placeholders() {
    assert_eq!(
        fill("{a} and {b} and {\"json\": 1}", &[("a", "{b}")]),
        "{b} and {b} and {\"json\": 1}"
    );
}
