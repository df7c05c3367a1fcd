//! Release generation: turns a category and its filled fields into press-release text.
//!
//! Flow: filled_fields → build_prompt → build_messages → ChatBackend::complete → trim.
//!
//! The generated text is returned verbatim (trimmed). Section parsing is a
//! read-only view layered on top; it never alters the text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{ChatBackend, ChatMessage, LlmError};
use crate::release::categories::ReleaseCategory;
use crate::release::prompts::{
    PROMPT_CLOSING, PROMPT_HEADER_PREFIX, REFERENCE_HINT, STRUCTURE_SYSTEM, STYLE_SYSTEM,
};
use crate::release::sections::{parse_sections, ReleaseSections};

/// Shown when a submission has no non-empty field.
pub const EMPTY_SUBMISSION_MESSAGE: &str = "최소한 하나의 필드는 입력해주세요.";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One generated press release. Created per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedRelease {
    pub release_id: Uuid,
    pub category: ReleaseCategory,
    /// Trimmed model output, displayed as-is.
    pub text: String,
    /// Title / subtitle / body when all three introducers are present.
    pub sections: Option<ReleaseSections>,
    pub generated_at: DateTime<Utc>,
}

impl GeneratedRelease {
    pub fn new(category: ReleaseCategory, text: String) -> Self {
        Self {
            release_id: Uuid::new_v4(),
            category,
            sections: parse_sections(&text),
            text,
            generated_at: Utc::now(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field input
// ────────────────────────────────────────────────────────────────────────────

/// Validates a submission against `category` and keeps the non-empty fields.
///
/// - every submitted label must belong to the category, and appear once
/// - values that are empty after trimming are dropped; kept values are forwarded untouched
/// - output follows registry order, not submission order
/// - an all-empty submission is a validation error, so no generation call is made
pub fn filled_fields<'a, I>(
    category: ReleaseCategory,
    submitted: I,
) -> Result<Vec<(&'static str, String)>, AppError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut values: Vec<Option<&'a str>> = vec![None; category.fields().len()];

    for (label, value) in submitted {
        let index = category
            .labels()
            .position(|l| l == label)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Field '{label}' does not belong to category '{category}'"
                ))
            })?;
        if values[index].replace(value).is_some() {
            return Err(AppError::Validation(format!(
                "Field '{label}' was submitted more than once"
            )));
        }
    }

    let filled: Vec<(&'static str, String)> = category
        .labels()
        .zip(values)
        .filter_map(|(label, value)| {
            value
                .filter(|v| !v.trim().is_empty())
                .map(|v| (label, v.to_string()))
        })
        .collect();

    if filled.is_empty() {
        return Err(AppError::Validation(EMPTY_SUBMISSION_MESSAGE.to_string()));
    }

    Ok(filled)
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt construction
// ────────────────────────────────────────────────────────────────────────────

/// Builds the user prompt: a header naming the category, one `label: value`
/// line per pair, then the closing instruction. No filtering happens here.
///
/// Pairs are taken as given. Callers holding bare values must pair them with
/// labels first; positional pairing stops at the shorter of labels and values.
pub fn build_prompt<L, V>(category: ReleaseCategory, pairs: &[(L, V)]) -> String
where
    L: AsRef<str>,
    V: AsRef<str>,
{
    let mut prompt = format!("{PROMPT_HEADER_PREFIX}{}\n\n", category.name());
    for (label, value) in pairs {
        prompt.push_str(label.as_ref());
        prompt.push_str(": ");
        prompt.push_str(value.as_ref());
        prompt.push('\n');
    }
    prompt.push('\n');
    prompt.push_str(PROMPT_CLOSING);
    prompt
}

/// Assembles the fixed instruction messages followed by the prompt.
pub fn build_messages(prompt: String, reference_hint: bool) -> Vec<ChatMessage> {
    let mut messages = vec![
        ChatMessage::system(STYLE_SYSTEM),
        ChatMessage::system(STRUCTURE_SYSTEM),
    ];
    if reference_hint {
        messages.push(ChatMessage::assistant(REFERENCE_HINT));
    }
    messages.push(ChatMessage::user(prompt));
    messages
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// Generates release text for `category` from explicit (label, value) pairs.
///
/// One request to the backend, no retry. Returns the response trimmed of
/// surrounding whitespace and otherwise unmodified.
pub async fn generate_release<L, V>(
    backend: &dyn ChatBackend,
    category: ReleaseCategory,
    pairs: &[(L, V)],
    reference_hint: bool,
) -> Result<String, LlmError>
where
    L: AsRef<str> + Sync,
    V: AsRef<str> + Sync,
{
    let prompt = build_prompt(category, pairs);
    let messages = build_messages(prompt, reference_hint);

    info!(
        "Generating {} release from {} field(s)",
        category.name(),
        pairs.len()
    );

    let raw = backend.complete(&messages).await?;
    let text = raw.trim();
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }

    Ok(text.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::llm_client::Role;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Backend returning a canned reply and recording every request.
    pub(crate) struct StubBackend {
        reply: Result<String, u16>,
        pub(crate) requests: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl StubBackend {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Fails every call with an API error carrying `status`.
        pub(crate) fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatBackend for StubBackend {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push(messages.to_vec());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "stubbed failure".to_string(),
                }),
            }
        }
    }

    /// Pairs labels with bare values by position, stopping at the shorter side.
    fn pair_positional<I, V>(category: ReleaseCategory, values: I) -> Vec<(&'static str, String)>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        category
            .labels()
            .zip(values)
            .map(|(label, value)| (label, value.into()))
            .collect()
    }

    #[test]
    fn test_filled_fields_drops_blank_values() {
        let submitted = [
            ("행사개요", "Flower festival July 22–23"),
            ("세부내용", "   "),
            ("참여방법", "Family visits, 1–5pm"),
        ];
        let filled = filled_fields(ReleaseCategory::EventNotice, submitted).unwrap();
        assert_eq!(
            filled,
            vec![
                ("행사개요", "Flower festival July 22–23".to_string()),
                ("참여방법", "Family visits, 1–5pm".to_string()),
            ]
        );
    }

    #[test]
    fn test_filled_fields_uses_registry_order() {
        let submitted = [("이용방법", "c"), ("정보개요", "a")];
        let filled = filled_fields(ReleaseCategory::InformationNotice, submitted).unwrap();
        let labels: Vec<_> = filled.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["정보개요", "이용방법"]);
    }

    #[test]
    fn test_filled_fields_keeps_value_untrimmed() {
        let filled = filled_fields(ReleaseCategory::Other, [("개요", "  내용  ")]).unwrap();
        assert_eq!(filled[0].1, "  내용  ");
    }

    #[test]
    fn test_filled_fields_all_empty_is_validation_error() {
        for category in ReleaseCategory::ALL {
            let submitted: Vec<(&str, &str)> = category.labels().map(|l| (l, "")).collect();
            let err = filled_fields(category, submitted).unwrap_err();
            match err {
                AppError::Validation(msg) => assert_eq!(msg, EMPTY_SUBMISSION_MESSAGE),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_filled_fields_rejects_foreign_label() {
        let err = filled_fields(ReleaseCategory::Other, [("행사개요", "x")]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_filled_fields_rejects_duplicate_label() {
        let err = filled_fields(ReleaseCategory::Other, [("개요", "a"), ("개요", "b")]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_pair_positional_truncates_to_shorter() {
        let pairs = pair_positional(ReleaseCategory::ActivityReport, ["a", "b"]);
        assert_eq!(
            pairs,
            vec![("활동내용", "a".to_string()), ("활동경과", "b".to_string())]
        );

        let pairs = pair_positional(ReleaseCategory::Other, ["1", "2", "3", "4", "5"]);
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_pair_positional_empty_values() {
        let pairs = pair_positional(ReleaseCategory::Other, Vec::<String>::new());
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_build_prompt_layout() {
        let prompt = build_prompt(
            ReleaseCategory::EventNotice,
            &[("행사개요", "수국 전시회"), ("참여방법", "가족 단위 방문")],
        );
        assert_eq!(
            prompt,
            "보도자료 유형: 행사안내\n\n\
             행사개요: 수국 전시회\n\
             참여방법: 가족 단위 방문\n\
             \n위의 정보를 바탕으로 전문적이고 공식적인 보도자료를 작성해주세요."
        );
    }

    #[test]
    fn test_build_prompt_one_line_per_pair_for_every_category() {
        for category in ReleaseCategory::ALL {
            let labels: Vec<_> = category.labels().collect();
            for n in 0..=labels.len() {
                let values: Vec<String> = (0..n).map(|i| format!("값{i}")).collect();
                let pairs = pair_positional(category, values);
                assert_eq!(pairs.len(), n.min(labels.len()));

                let prompt = build_prompt(category, &pairs);
                let lines: Vec<_> = prompt.lines().collect();
                assert_eq!(lines[0], format!("보도자료 유형: {category}"));
                assert_eq!(*lines.last().unwrap(), PROMPT_CLOSING);
                let field_lines = lines.iter().filter(|l| l.contains(": 값")).count();
                assert_eq!(field_lines, n);
            }
        }
    }

    #[test]
    fn test_build_prompt_accepts_no_pairs() {
        let prompt = build_prompt::<&str, &str>(ReleaseCategory::Other, &[]);
        assert_eq!(prompt, format!("보도자료 유형: 기타\n\n\n{PROMPT_CLOSING}"));
    }

    #[test]
    fn test_build_messages_order_and_roles() {
        let messages = build_messages("PROMPT".to_string(), true);
        let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::System, Role::Assistant, Role::User]
        );
        assert_eq!(messages[0].content, STYLE_SYSTEM);
        assert_eq!(messages[1].content, STRUCTURE_SYSTEM);
        assert_eq!(messages[2].content, REFERENCE_HINT);
        assert_eq!(messages[3].content, "PROMPT");
    }

    #[test]
    fn test_build_messages_without_reference_hint() {
        let messages = build_messages("PROMPT".to_string(), false);
        assert_eq!(messages.len(), 3);
        assert!(messages.iter().all(|m| m.content != REFERENCE_HINT));
        assert_eq!(messages.last().unwrap().role, Role::User);
    }

    #[tokio::test]
    async fn test_generate_returns_trimmed_reply() {
        let backend = StubBackend::replying("\n  제목: X\n서브타이틀: Y\n본문: Z  \n\n");
        let text = generate_release(
            &backend,
            ReleaseCategory::EventNotice,
            &[("행사개요", "x")],
            true,
        )
        .await
        .unwrap();
        assert_eq!(text, "제목: X\n서브타이틀: Y\n본문: Z");
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_as_last_message() {
        let backend = StubBackend::replying("ok");
        generate_release(&backend, ReleaseCategory::Other, &[("개요", "시민 안내")], true)
            .await
            .unwrap();

        let requests = backend.requests.lock().unwrap();
        let last = requests[0].last().unwrap();
        assert_eq!(last.role, Role::User);
        assert!(last.content.contains("개요: 시민 안내"));
    }

    #[tokio::test]
    async fn test_generate_surfaces_backend_failure() {
        let backend = StubBackend::failing(503);
        let result =
            generate_release(&backend, ReleaseCategory::Other, &[("개요", "x")], true).await;
        assert!(matches!(result, Err(LlmError::Api { status: 503, .. })));
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_whitespace_reply_is_empty_content() {
        let backend = StubBackend::replying("   \n ");
        let result =
            generate_release(&backend, ReleaseCategory::Other, &[("개요", "x")], true).await;
        assert!(matches!(result, Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_generated_release_parses_sections() {
        let release = GeneratedRelease::new(
            ReleaseCategory::EventNotice,
            "제목: X\n서브타이틀: Y\n본문: Z".to_string(),
        );
        assert_eq!(release.text, "제목: X\n서브타이틀: Y\n본문: Z");
        let sections = release.sections.unwrap();
        assert_eq!(sections.title, "X");
        assert_eq!(sections.body, "Z");
    }
}
