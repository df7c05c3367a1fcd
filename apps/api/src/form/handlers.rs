//! Axum route handlers for the HTML form.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Form,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::form::pages::{render, FormView, Notice, FIELD_PREFIX};
use crate::release::categories::ReleaseCategory;
use crate::release::pipeline::run_release;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

/// GET /
///
/// Renders the form for the selected category (first category by default),
/// pre-filled with that category's default texts.
pub async fn handle_form(
    Query(query): Query<CategoryQuery>,
) -> Result<Html<String>, AppError> {
    let category = match query.category.as_deref() {
        Some(name) => name.parse()?,
        None => ReleaseCategory::ALL[0],
    };

    Ok(Html(render(&FormView::with_defaults(category))))
}

/// POST /
///
/// Generates a release from the submitted form and renders it below the form.
/// Export, when enabled, is always attempted; its failure only hides the download link.
pub async fn handle_submit(
    State(state): State<AppState>,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<(StatusCode, Html<String>), AppError> {
    let category: ReleaseCategory = form
        .iter()
        .find(|(key, _)| key == "category")
        .map(|(_, value)| value.as_str())
        .ok_or_else(|| AppError::Validation("category is required".to_string()))?
        .parse()?;

    let submitted: Vec<(&str, &str)> = form
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(FIELD_PREFIX)
                .map(|label| (label, value.as_str()))
        })
        .collect();

    // Echo the user's input back into the form, in registry order.
    let mut view = FormView::with_defaults(category);
    for (label, value) in view.values.iter_mut() {
        if let Some((_, submitted_value)) = submitted.iter().find(|(l, _)| *l == *label) {
            *value = submitted_value.to_string();
        }
    }

    let outcome = match run_release(&state, category, submitted.iter().copied(), true).await {
        Ok(outcome) => outcome,
        Err(e @ AppError::Validation(_)) => {
            let status = e.status();
            view.notices.push(Notice::Warning(e.to_body().message));
            return Ok((status, Html(render(&view))));
        }
        Err(e) => {
            let status = e.status();
            view.notices.push(Notice::Error(e.to_body().message));
            return Ok((status, Html(render(&view))));
        }
    };

    if let Some(e) = &outcome.export_error {
        view.notices.push(Notice::Error(e.to_body().message));
    }
    view.release = Some(&outcome.release);
    view.document = outcome.document.as_ref();

    Ok((StatusCode::OK, Html(render(&view))))
}
