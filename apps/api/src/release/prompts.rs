// All LLM prompt constants for release generation.
// Wording is part of the output contract: downstream consumers key on the
// three section introducers below.

/// Section introducer for the title.
pub const TITLE_TOKEN: &str = "제목:";
/// Section introducer for the subtitle.
pub const SUBTITLE_TOKEN: &str = "서브타이틀:";
/// Section introducer for the body.
pub const BODY_TOKEN: &str = "본문:";

/// System directive fixing the writer persona and the plain past-tense register
/// (`~했다`, never `~했습니다`).
pub const STYLE_SYSTEM: &str =
    "당신은 전문적인 보도자료 작성자입니다. 어조는 '~했습니다'가 아니라 '~했다'로 작성해주세요.";

/// System directive naming the three required sections and their introducers.
pub const STRUCTURE_SYSTEM: &str = "보도자료의 구성은 제목, 서브타이틀, 본문 3개입니다. 파싱을 위해서 '제목:', '서브타이틀:', '본문:'이라고 표기해 주세요.";

/// Assistant-role directive asking the model to draw on similar releases.
/// Nothing is retrieved; see `Config::reference_hint`.
pub const REFERENCE_HINT: &str =
    "아래 프롬프트문과 유사한 보도자료들을 검색해서 보도자료 내용을 강화해주세요";

/// First prompt line. Followed by the category name.
pub const PROMPT_HEADER_PREFIX: &str = "보도자료 유형: ";

/// Last prompt line.
pub const PROMPT_CLOSING: &str = "위의 정보를 바탕으로 전문적이고 공식적인 보도자료를 작성해주세요.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_directive_names_tokens_in_order() {
        let title = STRUCTURE_SYSTEM.find(TITLE_TOKEN).unwrap();
        let subtitle = STRUCTURE_SYSTEM.find(SUBTITLE_TOKEN).unwrap();
        let body = STRUCTURE_SYSTEM.find(BODY_TOKEN).unwrap();
        assert!(title < subtitle && subtitle < body);
        assert_eq!(STRUCTURE_SYSTEM.matches(SUBTITLE_TOKEN).count(), 1);
        assert_eq!(STRUCTURE_SYSTEM.matches(BODY_TOKEN).count(), 1);
    }

    #[test]
    fn test_style_directive_prefers_plain_past_tense() {
        assert!(STYLE_SYSTEM.contains("'~했다'"));
    }
}
