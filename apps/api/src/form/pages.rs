//! HTML rendering for the press-release form.

use crate::document::DocumentArtifact;
use crate::release::categories::ReleaseCategory;
use crate::release::generator::GeneratedRelease;

/// Form field names carry this prefix; the rest is the category label.
pub const FIELD_PREFIX: &str = "field:";

/// A message shown above the result area.
#[derive(Debug, Clone)]
pub enum Notice {
    Warning(String),
    Error(String),
}

/// Everything one page render needs.
pub struct FormView<'a> {
    pub category: ReleaseCategory,
    /// Current textarea contents, in registry order.
    pub values: Vec<(&'static str, String)>,
    pub notices: Vec<Notice>,
    pub release: Option<&'a GeneratedRelease>,
    pub document: Option<&'a DocumentArtifact>,
}

impl<'a> FormView<'a> {
    /// A fresh form pre-filled with the category's default texts.
    pub fn with_defaults(category: ReleaseCategory) -> Self {
        Self {
            category,
            values: category
                .fields()
                .iter()
                .map(|&(label, default)| (label, default.to_string()))
                .collect(),
            notices: Vec::new(),
            release: None,
            document: None,
        }
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn render(view: &FormView<'_>) -> String {
    let mut category_options = String::new();
    for category in ReleaseCategory::ALL {
        let name = category.name();
        let checked = if category == view.category { " checked" } else { "" };
        category_options.push_str(&format!(
            r#"<label class="category"><input type="radio" name="category" value="{name}"{checked}> {name}</label>"#
        ));
    }

    let mut fields = String::new();
    for (label, value) in &view.values {
        let label = html_escape(label);
        fields.push_str(&format!(
            r#"
            <label class="field">{label}:
                <textarea name="{FIELD_PREFIX}{label}" rows="4">{}</textarea>
            </label>"#,
            html_escape(value)
        ));
    }

    let notices: String = view
        .notices
        .iter()
        .map(|notice| match notice {
            Notice::Warning(msg) => {
                format!(r#"<p class="notice warning">{}</p>"#, html_escape(msg))
            }
            Notice::Error(msg) => format!(r#"<p class="notice error">{}</p>"#, html_escape(msg)),
        })
        .collect();

    let result = match view.release {
        Some(release) => {
            let download = view
                .document
                .map(|document| {
                    format!(
                        r#"<p><a class="download" download="{}" href="{}">Word 파일 다운로드</a></p>"#,
                        document.filename,
                        document.data_uri()
                    )
                })
                .unwrap_or_default();
            format!(
                r#"
        <section id="result">
            <h2>생성된 보도자료</h2>
            <pre class="release">{}</pre>
            {download}
        </section>"#,
                html_escape(&release.text)
            )
        }
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>보도자료 생성기</title>
    <style>
        body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }}
        .category {{ margin-right: 1rem; }}
        .field {{ display: block; margin: 1rem 0; }}
        .field textarea {{ display: block; width: 100%; }}
        .notice.warning {{ background: #fff6d5; padding: .5rem; }}
        .notice.error {{ background: #fde2e2; padding: .5rem; }}
        .release {{ white-space: pre-wrap; background: #f6f6f6; padding: 1rem; }}
    </style>
</head>
<body>
    <h1>보도자료 생성기</h1>
    <form method="get" action="/">
        <p>보도자료 유형을 선택하세요:</p>
        {category_options}
        <button type="submit">선택</button>
    </form>
    <p>선택된 유형: {category}</p>
    <form method="post" action="/">
        <input type="hidden" name="category" value="{category}">
        {fields}
        <button type="submit">보도자료 생성</button>
    </form>
    {notices}
    {result}
</body>
</html>"#,
        category = view.category.name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape_basic() {
        assert_eq!(html_escape("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_defaults_prefill_fields() {
        let html = render(&FormView::with_defaults(ReleaseCategory::EventNotice));
        assert!(html.contains(r#"name="field:행사개요""#));
        assert!(html.contains("수국 전시회 개최"));
        assert!(html.contains(r#"value="행사안내" checked"#));
        assert!(!html.contains("생성된 보도자료"));
    }

    #[test]
    fn test_release_text_is_escaped() {
        let release = GeneratedRelease::new(ReleaseCategory::Other, "제목: <script>".to_string());
        let mut view = FormView::with_defaults(ReleaseCategory::Other);
        view.release = Some(&release);
        let html = render(&view);
        assert!(html.contains("제목: &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_download_link_only_with_document() {
        let release = GeneratedRelease::new(ReleaseCategory::Other, "본문".to_string());
        let document = DocumentArtifact::new(vec![1, 2, 3]);

        let mut view = FormView::with_defaults(ReleaseCategory::Other);
        view.release = Some(&release);
        assert!(!render(&view).contains("class=\"download\""));

        view.document = Some(&document);
        let html = render(&view);
        assert!(html.contains(r#"download="press_release.docx""#));
        assert!(html.contains("data:application/vnd.openxmlformats-officedocument"));
    }

    #[test]
    fn test_notices_rendered() {
        let mut view = FormView::with_defaults(ReleaseCategory::Other);
        view.notices.push(Notice::Warning("최소한 하나의 필드는 입력해주세요.".to_string()));
        view.notices.push(Notice::Error("템플릿 실패".to_string()));
        let html = render(&view);
        assert!(html.contains(r#"<p class="notice warning">최소한 하나의 필드는 입력해주세요.</p>"#));
        assert!(html.contains(r#"<p class="notice error">템플릿 실패</p>"#));
    }
}
