//! # Study Plan Handler
//!
//! `POST /plan`: a multipart form with the exam situation and an optional
//! syllabus PDF.

use super::{read_form, wrap_response, ApiResponse, AppError, AppState, DebugParams};
use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::Multipart;
use codelala::{
    types::resolve_subject, LearningPreference, ResourceType, StudyRequest,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

pub const SYLLABUS_FIELD: &str = "syllabus";

#[derive(Serialize, Deserialize, Debug)]
pub struct PlanResponse {
    pub text: String,
}

pub async fn plan_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<PlanResponse>>, AppError> {
    let form = read_form(multipart, SYLLABUS_FIELD).await?;

    let subject = resolve_subject(form.required("subject")?, form.text("other_subject"));
    let resource_type: ResourceType = form.required("resource_type")?.parse()?;
    let learning_preference: LearningPreference = form.required("learning_preference")?.parse()?;
    let request = StudyRequest::new(
        subject,
        form.number("days_left")?,
        form.number("hours_per_day")?,
        resource_type,
        learning_preference,
        form.document(),
    )?;
    info!(
        subject = request.subject(),
        days_left = request.days_left(),
        hours_per_day = request.hours_per_day(),
        has_syllabus = request.syllabus().is_some(),
        "Received study plan request"
    );

    let plan = app_state.assistant.generate_study_plan(&request).await?;

    // The plan is already generated; a failed log write only costs the record.
    if let Err(e) = app_state
        .interactions
        .clone()
        .record_blocking(request)
        .await
    {
        warn!("Failed to record interaction: {}", e);
    }

    let debug_info = json!({
        "prompt": plan.prompt,
        "analysis": plan.analysis,
        "structured_analysis": plan.analysis.as_ref().and_then(|a| a.structured()),
        "extraction": plan.extraction,
        "stages": plan.stages,
        "completion_calls": plan.completion_calls(),
    });

    Ok(wrap_response(
        PlanResponse { text: plan.text },
        debug_params,
        Some(debug_info),
    ))
}
