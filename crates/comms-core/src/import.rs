//! File import for the data-input view.
//!
//! Plain-text files are decoded as UTF-8. `.docx` documents are unzipped and
//! the body text is pulled out of `word/document.xml` with all formatting
//! stripped. Anything else is refused; nothing is partially imported.

use crate::error::{CommsError, Result};
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::OnceLock;

/// Extensions accepted without consulting the mime table.
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "csv", "json"];

const DOCX_BODY: &str = "word/document.xml";

/// Extract raw text from an uploaded file.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String> {
    let ext = extension(file_name);
    if ext.as_deref() == Some("docx") {
        return docx_text(file_name, bytes);
    }
    if !is_text_like(file_name, ext.as_deref()) {
        return Err(CommsError::UnsupportedFile(file_name.to_string()));
    }
    let text = std::str::from_utf8(bytes)
        .map_err(|_| CommsError::UnsupportedFile(file_name.to_string()))?;
    if text.contains('\0') {
        return Err(CommsError::UnsupportedFile(file_name.to_string()));
    }
    Ok(text.to_string())
}

/// Append imported text to the existing input, labelling the source file.
/// The separator line is only added when there is prior input.
pub fn append_import(existing: &str, file_name: &str, text: &str) -> String {
    if existing.is_empty() {
        return text.to_string();
    }
    format!("{existing}\n\n--- IMPORTED FILE: {file_name} ---\n\n{text}")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn is_text_like(file_name: &str, ext: Option<&str>) -> bool {
    if ext.is_some_and(|e| TEXT_EXTENSIONS.contains(&e)) {
        return true;
    }
    match mime_guess::from_path(file_name).first() {
        Some(mime) => mime.type_().as_str() == "text",
        // Unknown extension: let the UTF-8 check decide.
        None => true,
    }
}

fn docx_text(file_name: &str, bytes: &[u8]) -> Result<String> {
    let unsupported = || CommsError::UnsupportedFile(file_name.to_string());
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|_| unsupported())?;
    let mut body = archive.by_name(DOCX_BODY).map_err(|_| unsupported())?;
    let mut xml = String::new();
    body.read_to_string(&mut xml)?;
    Ok(strip_docx_markup(&xml))
}

static BREAK_RE: OnceLock<Regex> = OnceLock::new();
static TAB_RE: OnceLock<Regex> = OnceLock::new();
static TAG_RE: OnceLock<Regex> = OnceLock::new();
static NUMERIC_ENTITY_RE: OnceLock<Regex> = OnceLock::new();

fn break_re() -> &'static Regex {
    BREAK_RE.get_or_init(|| Regex::new(r"<w:(br|cr)\b[^>]*/>").unwrap())
}

fn tab_re() -> &'static Regex {
    TAB_RE.get_or_init(|| Regex::new(r"<w:tab\b[^>]*/>").unwrap())
}

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

fn numeric_entity_re() -> &'static Regex {
    NUMERIC_ENTITY_RE.get_or_init(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").unwrap())
}

/// Turn WordprocessingML into plain text: one blank line between
/// paragraphs, breaks as newlines, tabs preserved, entities decoded.
fn strip_docx_markup(xml: &str) -> String {
    let text = xml.replace("</w:p>", "\n\n");
    let text = break_re().replace_all(&text, "\n");
    let text = tab_re().replace_all(&text, "\t");
    let text = tag_re().replace_all(&text, "");
    let text = decode_entities(&text);
    text.trim_end().to_string()
}

fn decode_entities(s: &str) -> String {
    let s = numeric_entity_re().replace_all(s, |caps: &regex::Captures| {
        let raw = &caps[1];
        let code = match raw.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => raw.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_with_body(xml: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            let opts = zip::write::SimpleFileOptions::default();
            zip.start_file("[Content_Types].xml", opts).unwrap();
            zip.write_all(b"<Types/>").unwrap();
            zip.start_file(DOCX_BODY, opts).unwrap();
            zip.write_all(xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn plain_text_is_decoded() {
        let text = extract_text("notes.md", b"# Kickoff\nSponsor: Dr. Chen").unwrap();
        assert!(text.contains("Sponsor: Dr. Chen"));
    }

    #[test]
    fn unknown_extension_falls_back_to_utf8_check() {
        assert!(extract_text("minutes", b"plain words").is_ok());
        assert!(matches!(
            extract_text("minutes", &[0xff, 0xfe, 0x00]),
            Err(CommsError::UnsupportedFile(_))
        ));
    }

    #[test]
    fn binary_formats_are_refused() {
        assert!(matches!(
            extract_text("org-chart.png", &[0x89, b'P', b'N', b'G']),
            Err(CommsError::UnsupportedFile(name)) if name == "org-chart.png"
        ));
        assert!(extract_text("charter.pdf", b"%PDF-1.7").is_err());
    }

    #[test]
    fn nul_bytes_are_refused() {
        assert!(extract_text("data.txt", b"abc\0def").is_err());
    }

    #[test]
    fn docx_body_text_is_extracted() {
        let xml = r#"<?xml version="1.0"?><w:document><w:body>
            <w:p><w:r><w:t>Sponsor: Dr. Emily Chen</w:t></w:r></w:p>
            <w:p><w:r><w:t>R&amp;D</w:t><w:tab/><w:t>Lead</w:t><w:br/><w:t>Sarah &#x4D;iller</w:t></w:r></w:p>
            </w:body></w:document>"#;
        let text = extract_text("Charter.DOCX", &docx_with_body(xml)).unwrap();
        assert!(text.contains("Sponsor: Dr. Emily Chen"));
        assert!(text.contains("R&D\tLead\nSarah Miller"));
        assert!(!text.contains("<w:"));
    }

    #[test]
    fn corrupt_docx_is_refused() {
        assert!(matches!(
            extract_text("broken.docx", b"not a zip"),
            Err(CommsError::UnsupportedFile(_))
        ));
    }

    #[test]
    fn docx_without_body_is_refused() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            zip.start_file("other.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(b"<x/>").unwrap();
            zip.finish().unwrap();
        }
        assert!(extract_text("empty.docx", &buf.into_inner()).is_err());
    }

    #[test]
    fn append_adds_separator_only_after_existing_input() {
        assert_eq!(append_import("", "a.txt", "hello"), "hello");
        assert_eq!(
            append_import("prior notes", "b.docx", "more"),
            "prior notes\n\n--- IMPORTED FILE: b.docx ---\n\nmore"
        );
    }
}
