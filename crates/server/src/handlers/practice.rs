//! # Practice and Prompt Handlers

use super::{read_form, wrap_response, ApiResponse, AppError, AppState, DebugParams};
use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::Multipart;
use codelala::{types::resolve_subject, PracticeOutcome, PracticeRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

pub const MATERIALS_FIELD: &str = "materials";

#[derive(Serialize, Deserialize, Debug)]
pub struct PracticeResponse {
    pub text: String,
    /// True when the request was turned away without a model call.
    pub declined: bool,
}

#[derive(Deserialize, Debug)]
pub struct PromptsRequest {
    pub subject: String,
    #[serde(default)]
    pub other_subject: Option<String>,
    #[serde(default)]
    pub topic: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PromptsResponse {
    pub text: String,
}

/// `POST /practice`: five practice questions, optionally grounded in an
/// uploaded materials file.
pub async fn practice_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<PracticeResponse>>, AppError> {
    let form = read_form(multipart, MATERIALS_FIELD).await?;
    let subject = resolve_subject(form.required("subject")?, form.text("other_subject"));
    let topic = form.text("topic").unwrap_or_default().to_string();
    info!(subject = %subject, topic = %topic, "Received practice request");

    let request = PracticeRequest::new(subject, topic, form.document());
    let outcome = app_state
        .assistant
        .generate_practice_questions(request)
        .await?;

    let debug_info = match &outcome {
        PracticeOutcome::Generated {
            prompt, materials, ..
        } => json!({ "prompt": prompt, "materials": materials }),
        PracticeOutcome::Declined { reason, .. } => json!({ "reason": reason }),
    };

    Ok(wrap_response(
        PracticeResponse {
            text: outcome.text().to_string(),
            declined: outcome.is_declined(),
        },
        debug_params,
        Some(debug_info),
    ))
}

/// `POST /prompts`: five suggested prompts for studying a topic with an AI.
pub async fn prompts_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<PromptsRequest>,
) -> Result<Json<ApiResponse<PromptsResponse>>, AppError> {
    let subject = resolve_subject(&payload.subject, payload.other_subject.as_deref());
    if subject.is_empty() {
        return Err(AppError::BadRequest(
            "Missing required field 'subject'".to_string(),
        ));
    }
    info!(subject = %subject, topic = %payload.topic, "Received smart prompts request");

    let text = app_state
        .assistant
        .generate_smart_prompts(&subject, payload.topic.trim())
        .await?;

    Ok(wrap_response(
        PromptsResponse { text },
        debug_params,
        Some(json!({ "subject": subject })),
    ))
}
