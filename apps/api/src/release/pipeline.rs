//! Release pipeline: the request-level flow shared by the HTML form and the JSON API.
//!
//! Flow: filled_fields → generate_release → (export) fetch template → compose.
//!
//! Validation and generation failures abort the request. Export failures do
//! not: the generated text is still returned, alongside the export error.

use tracing::{info, warn};

use crate::document::{export_release, DocumentArtifact};
use crate::errors::AppError;
use crate::release::categories::ReleaseCategory;
use crate::release::generator::{filled_fields, generate_release, GeneratedRelease};
use crate::state::AppState;

/// Everything a submission produced.
#[derive(Debug)]
pub struct ReleaseOutcome {
    pub release: GeneratedRelease,
    /// Present only when export was requested and fully succeeded.
    pub document: Option<DocumentArtifact>,
    /// Why export failed, if it was attempted.
    pub export_error: Option<AppError>,
}

/// Runs one submission end to end.
///
/// Export is attempted only when `export` is set AND enabled in config.
pub async fn run_release<'a, I>(
    state: &AppState,
    category: ReleaseCategory,
    submitted: I,
    export: bool,
) -> Result<ReleaseOutcome, AppError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    // Step 1: keep non-empty fields (blocks all-empty submissions)
    let pairs = filled_fields(category, submitted)?;

    // Step 2: one generation call
    let text = generate_release(
        state.llm.as_ref(),
        category,
        &pairs,
        state.config.reference_hint,
    )
    .await?;
    let release = GeneratedRelease::new(category, text);
    info!(
        "Generated release {} ({} chars, sections parsed: {})",
        release.release_id,
        release.text.chars().count(),
        release.sections.is_some()
    );

    // Step 3: optional export into the Word template
    if !(export && state.config.export_enabled) {
        return Ok(ReleaseOutcome {
            release,
            document: None,
            export_error: None,
        });
    }

    let (document, export_error) = match export_release(
        state.templates.as_ref(),
        &state.config.template_repository,
        &state.config.template_path,
        &release.text,
    )
    .await
    {
        Ok(document) => (Some(document), None),
        Err(e) => {
            warn!("Export of release {} failed: {e}", release.release_id);
            (None, Some(e))
        }
    };

    Ok(ReleaseOutcome {
        release,
        document,
        export_error,
    })
}
