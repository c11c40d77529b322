//! # General Route Handlers
//!
//! The root and health endpoints, plus `/options`, which lists the choices a
//! client form offers.

use codelala::{
    logs::FeedbackKind,
    types::{DAYS_LEFT_RANGE, HOURS_PER_DAY_RANGE, OTHER_SUBJECT, SUBJECTS},
    LearningPreference, ResourceType,
};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct OptionEntry {
    pub key: String,
    pub label: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OptionsResponse {
    pub subjects: Vec<String>,
    pub other_subject: String,
    pub resource_types: Vec<OptionEntry>,
    pub learning_preferences: Vec<OptionEntry>,
    pub feedback_types: Vec<String>,
    pub days_left: Bounds,
    pub hours_per_day: Bounds,
}

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "codelala server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn options_handler() -> Json<OptionsResponse> {
    let bounds = |(min, max): (u32, u32)| Bounds { min, max };
    Json(OptionsResponse {
        subjects: SUBJECTS.iter().map(|s| s.to_string()).collect(),
        other_subject: OTHER_SUBJECT.to_string(),
        resource_types: ResourceType::all()
            .map(|r| OptionEntry {
                key: r.key().to_string(),
                label: r.label().to_string(),
            })
            .collect(),
        learning_preferences: LearningPreference::all()
            .map(|l| OptionEntry {
                key: l.key().to_string(),
                label: l.label().to_string(),
            })
            .collect(),
        feedback_types: FeedbackKind::all()
            .iter()
            .map(|k| k.label().to_string())
            .collect(),
        days_left: bounds(DAYS_LEFT_RANGE),
        hours_per_day: bounds(HOURS_PER_DAY_RANGE),
    })
}
