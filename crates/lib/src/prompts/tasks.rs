//! # Default Task Prompts
//!
//! The hardcoded templates for every generation path. Placeholders are written
//! as `{name}` and filled by the helpers in [`super::core`].

// --- System Persona ---
pub const STUDY_PLANNER_PERSONA: &str = "You are an expert study planner for students preparing for exams. If students provide anything other than a syllabus or anything unrelated to engineering subjects and topics, you will not be able to help them. In that case just say: 'I can only help with syllabus. Please upload a proper syllabus.'";

// --- Syllabus Analysis ---
/// Placeholders: `{syllabus_text}`, `{subject}`
pub const SYLLABUS_ANALYSIS_PROMPT: &str = r#"You are an expert educational consultant analyzing a course syllabus.

SYLLABUS CONTENT:
{syllabus_text}

Based on this syllabus for {subject}, please:

1. Identify and list all the major topics covered
2. Highlight the top 20% most important topics that likely cover 80% of exam content (Pareto principle)
3. For each high-priority topic, explain briefly why it's important (e.g., fundamental concept, frequently tested, etc.)

Format your response as a structured JSON with these sections:
- all_topics: [list of all topics]
- high_priority_topics: [list of the 20% most important topics]
- topic_importance: {"topic1": "reason for importance", "topic2": "reason for importance", ...}

Use your educational expertise to identify truly high-yield topics."#;

// --- Study Plan ---
/// Placeholders: `{subject}`, `{days_left}`, `{hours_per_day}`, `{resource_type}`, `{learning_preference}`
pub const STUDY_PLAN_SITUATION_PROMPT: &str = r#"As an expert educational assistant, create a personalized last-minute study plan with the following details:

STUDENT SITUATION:
- Subject: {subject}
- Days remaining until exam: {days_left}
- Available study hours per day: {hours_per_day}
- Primary study resource: {resource_type}
- Learning preference: {learning_preference}
"#;

/// Placeholders: `{analysis}`
pub const STUDY_PLAN_ANALYSIS_SECTION: &str = r#"
SYLLABUS ANALYSIS:
{analysis}

Base your study plan primarily on the high-priority topics identified in the syllabus analysis.
"#;

pub const STUDY_PLAN_CLOSING: &str = r#"
Please provide a comprehensive study plan with:
1. A day-by-day breakdown showing exactly which topics to cover each day
2. Priority ranking of the most high-yield topics (top 20% that will likely cover 80% of exam content)
3. For each major topic, suggest 2-3 specific prompts the student can use to ask ChatGPT/Gemini for deeper understanding
4. Suggest 5-minute breaks and how to utilize them effectively between study sessions
5. A brief motivational message for the student

Format your response with clear headings, bullet points, and a visually organized structure."#;

// --- Practice Questions ---
/// Placeholders: `{topic}`, `{subject}`
pub const PRACTICE_QUESTIONS_PROMPT: &str = r#"Create 5 high-quality practice questions for the topic '{topic}' in the subject '{subject}'.

For each question:
1. Start with a challenging but fair question that tests deep understanding
2. Provide a detailed solution
3. Add a brief explanation of the key concept being tested

Format each question clearly with numbers and visual separation.
"#;

/// Placeholders: `{materials}`
pub const PRACTICE_MATERIALS_SECTION: &str = r#"
BASE YOUR QUESTIONS ON THE FOLLOWING MATERIALS:
{materials}

Make sure the questions are directly relevant to the content in these materials,
focusing on the key concepts, formulas, and techniques mentioned."#;

pub const PRACTICE_CURRICULUM_SECTION: &str = r#"
Focus on standard curriculum content for this topic that would typically appear in exams.
Cover different aspects and difficulty levels of this topic."#;

// --- Smart Prompts ---
/// Placeholders: `{topic}`, `{subject}`
pub const SMART_PROMPTS_PROMPT: &str = r#"Generate 5 effective prompts that a student can use to ask ChatGPT/Gemini about the topic '{topic}' in '{subject}'.

For each prompt:
1. Make it specific and focused on a particular aspect of the topic
2. Design it to extract conceptual understanding rather than just facts
3. Frame it to get explanations with analogies or visualizations
4. Add a brief note on what kind of insight this prompt is designed to extract

Format as a numbered list with clear separation between prompts."#;

// --- User-facing Messages ---
pub const EMPTY_TOPIC_MESSAGE: &str =
    "Please enter a specific topic to generate practice questions.";
pub const NOT_ACADEMIC_MESSAGE: &str = "I can only generate practice questions for academic or study-related topics. Please enter a topic related to your studies or coursework.";
pub const FEEDBACK_THANKS_MESSAGE: &str =
    "Thank you for your feedback! It helps us improve future study plans.";
