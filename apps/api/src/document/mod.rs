// Word export: fetch the remote .docx template, append the generated release,
// hand the result back as an in-memory download. Nothing is written to disk.
// Zip work is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod composer;
pub mod fetcher;

use base64::Engine;
use serde::Serialize;

pub use composer::{compose, DocumentError};
pub use fetcher::{FetchError, HttpTemplateFetcher, TemplateSource};

/// Download filename offered to the browser.
pub const DOCUMENT_FILENAME: &str = "press_release.docx";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A composed Word document, held in memory for a single response.
#[derive(Debug, Clone)]
pub struct DocumentArtifact {
    pub filename: &'static str,
    pub bytes: Vec<u8>,
}

impl DocumentArtifact {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            filename: DOCUMENT_FILENAME,
            bytes,
        }
    }

    /// `data:` URI for direct browser download.
    pub fn data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{DOCX_MIME};base64,{encoded}")
    }

    pub fn link(&self) -> DocumentLink {
        DocumentLink {
            filename: self.filename,
            data_uri: self.data_uri(),
        }
    }
}

/// JSON view of a document artifact.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentLink {
    pub filename: &'static str,
    pub data_uri: String,
}

/// Fetches the template and appends `text` to it.
///
/// Either a complete document comes back or an error does; no partial artifact.
pub async fn export_release(
    templates: &dyn TemplateSource,
    repository: &str,
    path: &str,
    text: &str,
) -> Result<DocumentArtifact, crate::errors::AppError> {
    let template = templates.fetch(repository, path).await?;
    let text = text.to_string();

    let bytes = tokio::task::spawn_blocking(move || compose(&template, &text))
        .await
        .map_err(|e| anyhow::anyhow!("Document composition task failed: {e}"))??;

    tracing::info!("Composed {} ({} bytes)", DOCUMENT_FILENAME, bytes.len());
    Ok(DocumentArtifact::new(bytes))
}
