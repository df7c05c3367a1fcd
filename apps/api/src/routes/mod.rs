pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::form::handlers as form;
use crate::release::handlers as release;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // HTML form
        .route("/", get(form::handle_form).post(form::handle_submit))
        // Release API
        .route("/api/v1/categories", get(release::handle_list_categories))
        .route("/api/v1/releases", post(release::handle_generate_release))
        .route("/api/v1/documents", post(release::handle_compose_document))
        .with_state(state)
}
