//! # Request Types
//!
//! Validated, immutable request values for the three generation paths, plus
//! the option lists the input form offers.

use crate::{errors::ValidationError, extract::UploadedDocument};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Inclusive bounds for `days_left`.
pub const DAYS_LEFT_RANGE: (u32, u32) = (1, 15);
/// Inclusive bounds for `hours_per_day`.
pub const HOURS_PER_DAY_RANGE: (u32, u32) = (1, 12);

/// The sentinel subject choice that defers to the free-text subject field.
pub const OTHER_SUBJECT: &str = "Other (specify below)";

/// The subjects offered by the input form.
pub const SUBJECTS: &[&str] = &[
    "Data Structures & Algorithms (DSA)",
    "Operating Systems (OS)",
    "Database Management Systems (DBMS)",
    "Computer Networks (CN)",
    "Machine Learning (ML)",
    "Web Development",
    "Software Engineering",
    "Artificial Intelligence",
    "Theory of Computation",
    "Computer Architecture",
    OTHER_SUBJECT,
];

/// Resolves the subject from a dropdown choice and an optional free-text field.
///
/// The free text wins only when the dropdown holds the "Other" sentinel and the
/// free text is non-blank.
pub fn resolve_subject(choice: &str, other: Option<&str>) -> String {
    match other.map(str::trim) {
        Some(custom) if choice == OTHER_SUBJECT && !custom.is_empty() => custom.to_string(),
        _ => choice.trim().to_string(),
    }
}

/// A reusable configuration for a specific AI provider instance.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    /// The type of provider (`gemini` or `local`).
    pub provider: String,
    /// The API URL. Optional for Gemini, where it is derived from the model.
    #[serde(default)]
    pub api_url: Option<String>,
    /// The API key, which can be null for local providers.
    #[serde(default)]
    pub api_key: Option<String>,
    pub model_name: String,
}

/// Matches `input` against a label list: full label, the part before ` (`, or
/// the snake_case key, all case-insensitively.
fn match_label<T: Copy>(input: &str, table: &[(T, &str, &str)]) -> Option<T> {
    let needle = input.trim().to_lowercase();
    table.iter().find_map(|(value, key, label)| {
        let label = label.to_lowercase();
        let short = label.split(" (").next().unwrap_or(&label);
        (needle == label || needle == short || needle == *key).then_some(*value)
    })
}

/// The student's primary study resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Textbooks,
    VideoLectures,
    OnlineCourseMaterials,
    ClassNotes,
    PracticeProblems,
    PreviousYearPapers,
    MixedResources,
}

const RESOURCE_TYPES: &[(ResourceType, &str, &str)] = &[
    (ResourceType::Textbooks, "textbooks", "Textbooks"),
    (ResourceType::VideoLectures, "video_lectures", "Video lectures"),
    (
        ResourceType::OnlineCourseMaterials,
        "online_course_materials",
        "Online course materials",
    ),
    (ResourceType::ClassNotes, "class_notes", "Class notes"),
    (
        ResourceType::PracticeProblems,
        "practice_problems",
        "Practice problems",
    ),
    (
        ResourceType::PreviousYearPapers,
        "previous_year_papers",
        "Previous year papers",
    ),
    (
        ResourceType::MixedResources,
        "mixed_resources",
        "Mix of multiple resources",
    ),
];

impl ResourceType {
    pub fn all() -> impl Iterator<Item = ResourceType> {
        RESOURCE_TYPES.iter().map(|(v, _, _)| *v)
    }

    pub fn label(&self) -> &'static str {
        RESOURCE_TYPES
            .iter()
            .find(|(v, _, _)| v == self)
            .map(|(_, _, label)| *label)
            .unwrap_or_default()
    }

    /// The snake_case key accepted by [`FromStr`].
    pub fn key(&self) -> &'static str {
        RESOURCE_TYPES
            .iter()
            .find(|(v, _, _)| v == self)
            .map(|(_, key, _)| *key)
            .unwrap_or_default()
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ResourceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match_label(s, RESOURCE_TYPES)
            .ok_or_else(|| ValidationError::UnknownResourceType(s.to_string()))
    }
}

/// How the student prefers to learn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningPreference {
    Visual,
    Auditory,
    ReadingWriting,
    Kinesthetic,
    Mixed,
}

const LEARNING_PREFERENCES: &[(LearningPreference, &str, &str)] = &[
    (
        LearningPreference::Visual,
        "visual",
        "Visual learner (diagrams, charts)",
    ),
    (
        LearningPreference::Auditory,
        "auditory",
        "Auditory learner (discussions, explanations)",
    ),
    (
        LearningPreference::ReadingWriting,
        "reading_writing",
        "Reading/writing learner (notes, summaries)",
    ),
    (
        LearningPreference::Kinesthetic,
        "kinesthetic",
        "Kinesthetic learner (practice, examples)",
    ),
    (LearningPreference::Mixed, "mixed", "Mix of multiple styles"),
];

impl LearningPreference {
    pub fn all() -> impl Iterator<Item = LearningPreference> {
        LEARNING_PREFERENCES.iter().map(|(v, _, _)| *v)
    }

    pub fn label(&self) -> &'static str {
        LEARNING_PREFERENCES
            .iter()
            .find(|(v, _, _)| v == self)
            .map(|(_, _, label)| *label)
            .unwrap_or_default()
    }

    /// The snake_case key accepted by [`FromStr`].
    pub fn key(&self) -> &'static str {
        LEARNING_PREFERENCES
            .iter()
            .find(|(v, _, _)| v == self)
            .map(|(_, key, _)| *key)
            .unwrap_or_default()
    }
}

impl fmt::Display for LearningPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LearningPreference {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match_label(s, LEARNING_PREFERENCES)
            .ok_or_else(|| ValidationError::UnknownLearningPreference(s.to_string()))
    }
}

/// Everything needed for one study-plan generation.
#[derive(Debug, Clone)]
pub struct StudyRequest {
    subject: String,
    days_left: u32,
    hours_per_day: u32,
    resource_type: ResourceType,
    learning_preference: LearningPreference,
    syllabus: Option<UploadedDocument>,
}

impl StudyRequest {
    /// Validates and builds a request.
    pub fn new(
        subject: impl Into<String>,
        days_left: u32,
        hours_per_day: u32,
        resource_type: ResourceType,
        learning_preference: LearningPreference,
        syllabus: Option<UploadedDocument>,
    ) -> Result<Self, ValidationError> {
        let subject = subject.into().trim().to_string();
        if subject.is_empty() {
            return Err(ValidationError::EmptySubject);
        }

        let (min, max) = DAYS_LEFT_RANGE;
        if !(min..=max).contains(&days_left) {
            return Err(ValidationError::DaysLeftOutOfRange {
                value: days_left,
                min,
                max,
            });
        }

        let (min, max) = HOURS_PER_DAY_RANGE;
        if !(min..=max).contains(&hours_per_day) {
            return Err(ValidationError::HoursPerDayOutOfRange {
                value: hours_per_day,
                min,
                max,
            });
        }

        Ok(Self {
            subject,
            days_left,
            hours_per_day,
            resource_type,
            learning_preference,
            syllabus,
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn days_left(&self) -> u32 {
        self.days_left
    }

    pub fn hours_per_day(&self) -> u32 {
        self.hours_per_day
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn learning_preference(&self) -> LearningPreference {
        self.learning_preference
    }

    pub fn syllabus(&self) -> Option<&UploadedDocument> {
        self.syllabus.as_ref()
    }
}

/// A practice-question request. The topic is checked at generation time so a
/// blank topic produces a user-facing message rather than an error.
#[derive(Debug, Clone)]
pub struct PracticeRequest {
    pub subject: String,
    pub topic: String,
    pub materials: Option<UploadedDocument>,
}

impl PracticeRequest {
    pub fn new(
        subject: impl Into<String>,
        topic: impl Into<String>,
        materials: Option<UploadedDocument>,
    ) -> Self {
        Self {
            subject: subject.into(),
            topic: topic.into(),
            materials,
        }
    }
}
