//! Splits generated text on the three section introducers.
//!
//! Read-only view: the displayed text and the composed document always use the
//! raw string. Models often wrap introducers in markdown (`**제목:**`), so
//! emphasis and heading markers are stripped from section edges.

use serde::{Deserialize, Serialize};

use crate::release::prompts::{BODY_TOKEN, SUBTITLE_TOKEN, TITLE_TOKEN};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSections {
    pub title: String,
    pub subtitle: String,
    pub body: String,
}

/// Returns the three sections when all introducers appear in order, else `None`.
pub fn parse_sections(text: &str) -> Option<ReleaseSections> {
    let title_start = text.find(TITLE_TOKEN)? + TITLE_TOKEN.len();
    let subtitle_at = title_start + text[title_start..].find(SUBTITLE_TOKEN)?;
    let subtitle_start = subtitle_at + SUBTITLE_TOKEN.len();
    let body_at = subtitle_start + text[subtitle_start..].find(BODY_TOKEN)?;
    let body_start = body_at + BODY_TOKEN.len();

    Some(ReleaseSections {
        title: clean(&text[title_start..subtitle_at]),
        subtitle: clean(&text[subtitle_start..body_at]),
        body: clean(&text[body_start..]),
    })
}

fn clean(section: &str) -> String {
    section
        .trim_matches(|c: char| c.is_whitespace() || c == '*' || c == '#')
        .to_string()
}
