//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for `codelala-server`,
//! split by the part of the study assistant they expose.

pub mod feedback;
pub mod general;
pub mod plan;
pub mod practice;

// Re-export all handlers so the router can reach them under `handlers::`.
pub use feedback::*;
pub use general::*;
pub use plan::*;
pub use practice::*;

// Shared items used by multiple handler modules.
use super::{
    errors::AppError,
    state::AppState,
    types::{ApiResponse, DebugParams},
};
use axum::{extract::Query, Json};
use axum_extra::extract::Multipart;
use codelala::UploadedDocument;
use serde_json::Value;
use std::collections::HashMap;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// A shared helper function to wrap a successful result in the standard `ApiResponse`
/// format, optionally including debug information if requested.
pub(crate) fn wrap_response<T>(
    result: T,
    debug_params: Query<DebugParams>,
    debug_info: Option<Value>,
) -> Json<ApiResponse<T>> {
    let debug = if debug_params.debug.unwrap_or(false) {
        debug_info
    } else {
        None
    };
    Json(ApiResponse { debug, result })
}

/// An uploaded file written to a temporary path for the extractor.
///
/// The file is removed when this value is dropped.
pub(crate) struct SavedUpload {
    _file: NamedTempFile,
    document: UploadedDocument,
}

impl SavedUpload {
    pub(crate) fn document(&self) -> &UploadedDocument {
        &self.document
    }
}

/// The text fields of a multipart form plus at most one file.
#[derive(Default)]
pub(crate) struct FormData {
    fields: HashMap<String, String>,
    upload: Option<SavedUpload>,
}

impl FormData {
    pub(crate) fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// A required field. Missing or blank values are a bad request.
    pub(crate) fn required(&self, name: &str) -> Result<&str, AppError> {
        self.text(name)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest(format!("Missing required field '{name}'")))
    }

    pub(crate) fn number(&self, name: &str) -> Result<u32, AppError> {
        let raw = self.required(name)?;
        raw.trim()
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Field '{name}' must be a whole number, got '{raw}'")))
    }

    pub(crate) fn document(&self) -> Option<UploadedDocument> {
        self.upload.as_ref().map(|u| u.document().clone())
    }
}

// Keeps only characters safe for a file suffix, e.g. ".pdf".
fn upload_suffix(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.chars().filter(char::is_ascii_alphanumeric).collect::<String>())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// Reads every field of a multipart request. The field named `file_field` is
/// saved to a temporary file; an empty upload counts as no upload.
pub(crate) async fn read_form(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<FormData, AppError> {
    let mut form = FormData::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        if name == file_field {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let data = field.bytes().await?;
            if data.is_empty() {
                debug!("Ignoring empty upload in field '{}'", name);
                continue;
            }

            let file = tempfile::Builder::new()
                .prefix("codelala-")
                .suffix(&upload_suffix(&file_name))
                .tempfile()
                .map_err(anyhow::Error::from)?;
            tokio::fs::write(file.path(), &data)
                .await
                .map_err(anyhow::Error::from)?;
            debug!(
                "Saved upload '{}' ({} bytes) to {}",
                file_name,
                data.len(),
                file.path().display()
            );

            let document = UploadedDocument::new(file.path());
            form.upload = Some(SavedUpload {
                _file: file,
                document,
            });
        } else if name.is_empty() {
            warn!("Ignoring unnamed multipart field");
        } else {
            let value = field.text().await?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}
