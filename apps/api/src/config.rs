use anyhow::{Context, Result};

use crate::llm_client::OPENAI_API_URL;

/// Host serving raw repository files.
pub const DEFAULT_TEMPLATE_BASE_URL: &str = "https://raw.githubusercontent.com";
/// Repository holding the press-release Word template (`owner/repo`).
pub const DEFAULT_TEMPLATE_REPOSITORY: &str = "pyeongtaek-pr/press-release-templates";
/// Path of the template inside the repository, on the `main` branch.
pub const DEFAULT_TEMPLATE_PATH: &str = "templates/press_release.docx";

/// Application configuration loaded from environment variables.
/// Startup fails if the generation credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub template_base_url: String,
    pub template_repository: String,
    pub template_path: String,
    /// Offer a `.docx` download after generation.
    pub export_enabled: bool,
    /// Send the "strengthen with similar releases" directive. No retrieval backs it.
    pub reference_hint: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            openai_api_key: require("OPENAI_API_KEY")?,
            openai_api_url: or_default("OPENAI_API_URL", OPENAI_API_URL),
            template_base_url: or_default("TEMPLATE_BASE_URL", DEFAULT_TEMPLATE_BASE_URL),
            template_repository: or_default("TEMPLATE_REPOSITORY", DEFAULT_TEMPLATE_REPOSITORY),
            template_path: or_default("TEMPLATE_PATH", DEFAULT_TEMPLATE_PATH),
            export_enabled: parse_flag("EXPORT_ENABLED", lookup("EXPORT_ENABLED"), true)?,
            reference_hint: parse_flag(
                "RELEASE_REFERENCE_HINT",
                lookup("RELEASE_REFERENCE_HINT"),
                true,
            )?,
            port: or_default("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: or_default("RUST_LOG", "info"),
        })
    }
}

fn parse_flag(key: &str, value: Option<String>, default: bool) -> Result<bool> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{key} must be a boolean, got '{other}'"),
    }
}
