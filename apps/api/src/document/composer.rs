//! Document composer: appends the generated release to a `.docx` template.
//!
//! A `.docx` file is a zip package; the visible text lives in `word/document.xml`.
//! Composition rewrites that one part and copies every other entry unchanged.
//!
//! The whole release goes into ONE paragraph with ONE run, styled with a fixed
//! font and size. Section introducers are inserted verbatim, not styled.

use std::io::{Cursor, Read, Seek, Write};

use thiserror::Error;
use zip::{result::ZipError, write::SimpleFileOptions, CompressionMethod, ZipArchive, ZipWriter};

/// Main document part inside the package.
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Font forced onto the appended run (all scripts).
pub const RELEASE_FONT: &str = "맑은 고딕";
/// Point size forced onto the appended run.
pub const RELEASE_FONT_SIZE_PT: u32 = 11;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("template is not a valid Word package: {0}")]
    Package(#[from] ZipError),

    #[error("template has no {} part", DOCUMENT_PART)]
    MissingDocumentPart,

    #[error("main document part has no <w:body> element")]
    MissingBody,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Appends `text` as a single styled paragraph and serializes the package.
pub fn compose(template: &[u8], text: &str) -> Result<Vec<u8>, DocumentError> {
    let mut archive = ZipArchive::new(Cursor::new(template))?;
    let document_xml = read_part(&mut archive, DOCUMENT_PART)?;
    let updated = append_paragraph(&document_xml, &release_paragraph(text))?;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        if entry.name() == DOCUMENT_PART {
            writer.start_file(
                DOCUMENT_PART,
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            )?;
            writer.write_all(updated.as_bytes())?;
        } else {
            writer.raw_copy_file(entry)?;
        }
    }

    Ok(writer.finish()?.into_inner())
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<String, DocumentError> {
    let mut part = archive.by_name(name).map_err(|e| match e {
        ZipError::FileNotFound => DocumentError::MissingDocumentPart,
        other => DocumentError::Package(other),
    })?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

// ────────────────────────────────────────────────────────────────────────────
// Writing
// ────────────────────────────────────────────────────────────────────────────

/// Builds the `<w:p>` element holding `text` in one run.
fn release_paragraph(text: &str) -> String {
    let half_points = RELEASE_FONT_SIZE_PT * 2;
    let font = RELEASE_FONT;

    let mut content = String::new();
    for (i, line) in text.split(['\n', '\r']).enumerate() {
        if i > 0 {
            content.push_str("<w:br/>");
        }
        for (j, chunk) in line.split('\t').enumerate() {
            if j > 0 {
                content.push_str("<w:tab/>");
            }
            if !chunk.is_empty() {
                content.push_str(r#"<w:t xml:space="preserve">"#);
                content.push_str(&escape_xml(chunk));
                content.push_str("</w:t>");
            }
        }
    }

    format!(
        r#"<w:p><w:r><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/><w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/></w:rPr>{content}</w:r></w:p>"#
    )
}

/// Inserts `paragraph` as the last block of the body.
///
/// A body-level `<w:sectPr>` must stay the final child, so the paragraph goes
/// in front of it. Section properties nested deeper (inside a paragraph, a
/// table or a tracked `<w:sectPrChange>`) are left alone.
fn append_paragraph(xml: &str, paragraph: &str) -> Result<String, DocumentError> {
    let Some(body_end) = xml.rfind("</w:body>") else {
        if xml.contains("<w:body/>") {
            return Ok(xml.replacen("<w:body/>", &format!("<w:body>{paragraph}</w:body>"), 1));
        }
        return Err(DocumentError::MissingBody);
    };
    let content_start = body_content_start(&xml[..body_end]).ok_or(DocumentError::MissingBody)?;

    let insert_at = top_level_sect_pr(&xml[content_start..body_end])
        .map(|pos| content_start + pos)
        .unwrap_or(body_end);

    let mut updated = String::with_capacity(xml.len() + paragraph.len());
    updated.push_str(&xml[..insert_at]);
    updated.push_str(paragraph);
    updated.push_str(&xml[insert_at..]);
    Ok(updated)
}

/// Offset just past the `<w:body>` start tag.
fn body_content_start(xml: &str) -> Option<usize> {
    const OPEN: &str = "<w:body";
    let mut from = 0;
    while let Some(pos) = xml[from..].find(OPEN) {
        let start = from + pos;
        let after = &xml[start + OPEN.len()..];
        match after.chars().next() {
            Some('>') => return Some(start + OPEN.len() + 1),
            Some(c) if c.is_whitespace() => {
                return after.find('>').map(|end| start + OPEN.len() + end + 1)
            }
            _ => from = start + OPEN.len(),
        }
    }
    None
}

/// Offset of the `<w:sectPr>` that is a direct child of `body`, if any.
fn top_level_sect_pr(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut found = None;
    let mut offset = 0;

    while let Some(rel) = body[offset..].find('<') {
        let start = offset + rel;
        let Some(len) = body[start..].find('>') else {
            break;
        };
        let tag = &body[start + 1..start + len];
        offset = start + len + 1;

        if tag.starts_with('?') || tag.starts_with('!') {
            continue;
        }
        if tag.starts_with('/') {
            depth = depth.saturating_sub(1);
            continue;
        }

        let self_closing = tag.ends_with('/');
        let name = tag
            .trim_end_matches('/')
            .split(char::is_whitespace)
            .next()
            .unwrap_or("");
        if depth == 0 && name == "w:sectPr" {
            found = Some(start);
        }
        if !self_closing {
            depth += 1;
        }
    }

    found
}

/// Escapes markup characters and drops control characters XML 1.0 forbids.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() && !matches!(c, '\n' | '\r' | '\t') && (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
