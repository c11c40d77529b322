use super::{AppError, AppState};
use axum::{extract::State, Json};
use codelala::FeedbackKind;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Deserialize, Debug)]
pub struct FeedbackRequest {
    pub feedback_type: String,
    #[serde(default)]
    pub feedback_text: String,
    #[serde(default)]
    pub plan_details: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct FeedbackResponse {
    pub message: String,
}

/// `POST /feedback`: appends one row to the feedback log.
pub async fn feedback_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let kind: FeedbackKind = payload.feedback_type.parse()?;
    info!(feedback_type = %kind, "Received feedback");

    let message = app_state
        .feedback
        .clone()
        .save_blocking(kind, payload.feedback_text, payload.plan_details)
        .await?;

    Ok(Json(FeedbackResponse {
        message: message.to_string(),
    }))
}
