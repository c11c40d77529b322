//! # CodeLala
//!
//! Document-grounded study assistance: turns a student's exam situation and an
//! optional syllabus or notes file into a study plan, practice questions or
//! AI-prompting suggestions, using an LLM as the generation engine.
//!
//! The study-plan flow has two stages. When a syllabus yields enough text it is
//! first analyzed into a prioritized topic list, and that analysis is folded
//! into the plan prompt. Practice questions pass a keyword relevance gate
//! before any model call.

pub mod analyzer;
pub mod assistant;
pub mod completion;
pub mod errors;
pub mod extract;
pub mod gate;
pub mod logs;
pub mod planner;
pub mod practice;
pub mod prompts;
pub mod providers;
pub mod types;

pub use analyzer::{SyllabusAnalysis, StructuredAnalysis};
pub use assistant::{PlanResult, PlanStage, StudyAssistant, StudyAssistantBuilder};
pub use completion::{CompletionClient, RetryPolicy};
pub use errors::{LogError, PromptError, ValidationError};
pub use extract::{DocumentKind, ExtractedText, UploadedDocument};
pub use gate::RelevanceGate;
pub use logs::{FeedbackKind, FeedbackLog, InteractionLog};
pub use practice::{DeclineReason, PracticeOutcome};
pub use types::{LearningPreference, PracticeRequest, ProviderConfig, ResourceType, StudyRequest};
