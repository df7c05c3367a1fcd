//! Axum route handlers for the Release JSON API.

use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::document::{export_release, DocumentLink, DOCX_MIME};
use crate::errors::{AppError, ErrorBody};
use crate::release::categories::{fields_for, ReleaseCategory};
use crate::release::generator::GeneratedRelease;
use crate::release::pipeline::run_release;
use crate::state::AppState;

const EXPORT_DISABLED_MESSAGE: &str = "Document export is disabled";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FieldView {
    pub label: &'static str,
    pub placeholder: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub name: ReleaseCategory,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateReleaseRequest {
    pub category: ReleaseCategory,
    /// Label → value. Labels must belong to `category`.
    pub fields: BTreeMap<String, String>,
    /// Also compose the Word document.
    #[serde(default)]
    pub export: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateReleaseResponse {
    pub release: GeneratedRelease,
    pub document: Option<DocumentLink>,
    pub export_error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ComposeDocumentRequest {
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/categories
///
/// Lists every category with its ordered fields.
pub async fn handle_list_categories() -> Json<Vec<CategoryView>> {
    Json(
        ReleaseCategory::ALL
            .into_iter()
            .map(|category| CategoryView {
                name: category,
                fields: fields_for(category)
                    .iter()
                    .map(|&(label, placeholder)| FieldView { label, placeholder })
                    .collect(),
            })
            .collect(),
    )
}

/// POST /api/v1/releases
///
/// Generates a release. With `export: true`, also composes the Word document;
/// an export failure is reported in `export_error` and the text is still returned.
/// Export requested while disabled in config is reported there as `NOT_FOUND`.
pub async fn handle_generate_release(
    State(state): State<AppState>,
    Json(request): Json<GenerateReleaseRequest>,
) -> Result<Json<GenerateReleaseResponse>, AppError> {
    let submitted = request
        .fields
        .iter()
        .map(|(label, value)| (label.as_str(), value.as_str()));

    let outcome = run_release(&state, request.category, submitted, request.export).await?;

    let export_error = if request.export && !state.config.export_enabled {
        Some(AppError::NotFound(EXPORT_DISABLED_MESSAGE.to_string()).to_body())
    } else {
        outcome.export_error.as_ref().map(AppError::to_body)
    };

    Ok(Json(GenerateReleaseResponse {
        release: outcome.release,
        document: outcome.document.as_ref().map(|d| d.link()),
        export_error,
    }))
}

/// POST /api/v1/documents
///
/// Composes the given text into the template and returns the `.docx` as an attachment.
pub async fn handle_compose_document(
    State(state): State<AppState>,
    Json(request): Json<ComposeDocumentRequest>,
) -> Result<Response, AppError> {
    if !state.config.export_enabled {
        return Err(AppError::NotFound(EXPORT_DISABLED_MESSAGE.to_string()));
    }
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let document = export_release(
        state.templates.as_ref(),
        &state.config.template_repository,
        &state.config.template_path,
        &request.text,
    )
    .await?;

    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    Ok((
        [
            (header::CONTENT_TYPE, DOCX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response())
}
