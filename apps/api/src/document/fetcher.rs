//! Template retrieval: one unauthenticated GET of a raw repository file.
//!
//! Only `200 OK` counts as success. No retry, no fallback template.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

/// Branch the template is read from.
pub const TEMPLATE_BRANCH: &str = "main";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("template not available at {url} (status {status})")]
    NotFound { url: String, status: u16 },

    #[error("template request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Source of the binary Word template.
///
/// Carried in `AppState` as `Arc<dyn TemplateSource>`.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn fetch(&self, repository: &str, path: &str) -> Result<Bytes, FetchError>;
}

/// Fetches templates from a raw-file host (`{base}/{repository}/main/{path}`).
#[derive(Clone)]
pub struct HttpTemplateFetcher {
    client: Client,
    base_url: String,
}

impl HttpTemplateFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn template_url(&self, repository: &str, path: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            repository.trim_matches('/'),
            TEMPLATE_BRANCH,
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateFetcher {
    async fn fetch(&self, repository: &str, path: &str) -> Result<Bytes, FetchError> {
        let url = self.template_url(repository, path);
        debug!("Fetching template from {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!("Template fetch returned {status} for {url}");
            return Err(FetchError::NotFound {
                url,
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}
