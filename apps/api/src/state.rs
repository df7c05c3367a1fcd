use std::sync::Arc;

use crate::config::Config;
use crate::document::TemplateSource;
use crate::llm_client::ChatBackend;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; nothing here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Generation backend. Default: `LlmClient` (OpenAI Chat Completions).
    pub llm: Arc<dyn ChatBackend>,
    /// Word template source. Default: `HttpTemplateFetcher` against raw repository files.
    pub templates: Arc<dyn TemplateSource>,
    pub config: Config,
}
