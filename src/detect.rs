//! Input format detection.
//!
//! Documents reach the engine either as PDF files or as JSON files holding
//! text runs that were extracted elsewhere. Detection looks at the leading
//! bytes first and only falls back to the file extension for JSON.

use crate::error::{Error, Result};
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Kind of document input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// A PDF file with the given header version (e.g. "1.7")
    Pdf { version: String },
    /// Pre-extracted text runs serialized as JSON
    Runs,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Pdf { version } => write!(f, "PDF {}", version),
            InputKind::Runs => write!(f, "text runs (JSON)"),
        }
    }
}

/// Read the PDF header version from raw bytes.
pub fn pdf_version(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }
    Ok(version)
}

/// Detect the input kind from the document bytes and, optionally, its path.
///
/// JSON input is recognised either by a `.json` extension or by a leading
/// `{` after whitespace.
pub fn detect_input(data: &[u8], path: Option<&Path>) -> Result<InputKind> {
    if data.starts_with(PDF_MAGIC) {
        return pdf_version(data).map(|version| InputKind::Pdf { version });
    }

    let json_ext = path
        .and_then(|p| p.extension())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let json_body = data
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .map(|b| *b == b'{')
        .unwrap_or(false);

    if json_ext || json_body {
        Ok(InputKind::Runs)
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    pdf_version(data).is_ok()
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_version() {
        assert_eq!(pdf_version(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").unwrap(), "1.7");
        assert_eq!(pdf_version(b"%PDF-2.0\n").unwrap(), "2.0");
        assert!(matches!(pdf_version(b"%PDF"), Err(Error::UnknownFormat)));
        assert!(matches!(
            pdf_version(b"%PDF-x.y\n"),
            Err(Error::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_detect_input_pdf() {
        let kind = detect_input(b"%PDF-1.4\n...", None).unwrap();
        assert_eq!(
            kind,
            InputKind::Pdf {
                version: "1.4".to_string()
            }
        );
    }

    #[test]
    fn test_detect_input_json() {
        assert_eq!(
            detect_input(b"  {\"pages\": []}", None).unwrap(),
            InputKind::Runs
        );
        assert_eq!(
            detect_input(b"[]", Some(Path::new("runs.JSON"))).unwrap(),
            InputKind::Runs
        );
    }

    #[test]
    fn test_detect_input_unknown() {
        let result = detect_input(b"<!DOCTYPE html>", Some(Path::new("page.html")));
        assert!(matches!(result, Err(Error::UnknownFormat)));
        assert!(!is_pdf_bytes(b"Not a PDF"));
    }
}
