//! # Document Text Extraction
//!
//! Turns an uploaded file into a flat, whitespace-normalized, length-bounded
//! text blob. Extraction never fails outward: every outcome is one of the
//! [`ExtractedText`] variants, so callers cannot mistake an error message for
//! document content.

#[cfg(feature = "pdf")]
pub mod pdf_text;

use regex::Regex;
use serde::Serialize;
use std::{
    fmt,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// The maximum number of characters kept from a document.
pub const MAX_EXTRACTED_CHARS: usize = 12_000;

/// Appended to text that was cut at [`MAX_EXTRACTED_CHARS`].
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// Extracted text must be longer than this to be folded into a prompt.
pub const MIN_USABLE_CHARS: usize = 100;

/// Every extraction failure message starts with this.
pub const EXTRACTION_ERROR_PREFIX: &str = "Error extracting text from";

/// Returned in place of text for `.docx` uploads.
pub const DOCX_ADVISORY: &str = "DOCX file detected. DOCX text extraction is not available yet; please upload the material as a PDF or TXT file for full support.";

/// Kinds accepted by the study-plan (syllabus) flow.
pub const SYLLABUS_KINDS: &[DocumentKind] = &[DocumentKind::Pdf];

/// Kinds accepted by the practice-materials flow.
pub const MATERIALS_KINDS: &[DocumentKind] =
    &[DocumentKind::Pdf, DocumentKind::Text, DocumentKind::Docx];

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static whitespace pattern is valid"));

/// The document type, inferred from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Text,
    Docx,
    Unknown,
}

impl DocumentKind {
    /// Detect the kind from an extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "txt" => Self::Text,
            "docx" => Self::Docx,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "PDF"),
            DocumentKind::Text => write!(f, "text file"),
            DocumentKind::Docx => write!(f, "DOCX"),
            DocumentKind::Unknown => write!(f, "file"),
        }
    }
}

/// A single uploaded file, resolved to a local path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    path: PathBuf,
    kind: DocumentKind,
}

impl UploadedDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = DocumentKind::from_extension(
            path.extension().and_then(|e| e.to_str()).unwrap_or(""),
        );
        Self { path, kind }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// The lowercase extension with a leading dot, or an empty string.
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default()
    }
}

/// The outcome of extracting one (optional) document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractedText {
    /// No document was supplied.
    Absent,
    /// Normalized text, possibly cut at the length cap.
    Text { content: String, truncated: bool },
    /// The format is recognized but has no extractor, or is not accepted here.
    Unsupported { extension: String, advisory: String },
    /// Reading or parsing the document failed.
    Failed { message: String },
}

impl ExtractedText {
    /// Builds the `Text` variant from raw text: collapse whitespace, trim, cap.
    pub fn from_raw(raw: &str) -> Self {
        let (content, truncated) = truncate(normalize_whitespace(raw));
        ExtractedText::Text { content, truncated }
    }

    /// The text, if extraction produced any.
    pub fn text(&self) -> Option<&str> {
        match self {
            ExtractedText::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// The text, if it is long enough to ground a prompt.
    pub fn usable_text(&self) -> Option<&str> {
        self.text()
            .filter(|content| content.chars().count() > MIN_USABLE_CHARS)
    }
}

/// Collapses every whitespace run into one space and trims both ends.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Cuts `text` to [`MAX_EXTRACTED_CHARS`] characters plus the marker.
/// Returns whether the cut happened.
pub fn truncate(text: String) -> (String, bool) {
    match text.char_indices().nth(MAX_EXTRACTED_CHARS) {
        Some((byte_idx, _)) => {
            let mut cut = text[..byte_idx].to_string();
            cut.push_str(TRUNCATION_MARKER);
            (cut, true)
        }
        None => (text, false),
    }
}

#[derive(Error, Debug)]
pub(crate) enum ExtractError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[cfg_attr(not(feature = "pdf"), allow(dead_code))]
    #[error("{0}")]
    Parse(String),
}

/// Extracts text from `document`, accepting only the listed kinds.
///
/// A kind outside `accepted` is reported as `Unsupported` without touching
/// the file.
pub fn extract_document(
    document: Option<&UploadedDocument>,
    accepted: &[DocumentKind],
) -> ExtractedText {
    let Some(document) = document else {
        return ExtractedText::Absent;
    };

    let kind = document.kind();
    let extension = document.extension();
    info!(path = %document.path().display(), ?kind, "Extracting document text");

    let raw = match kind {
        _ if !accepted.contains(&kind) => None,
        DocumentKind::Docx => {
            return ExtractedText::Unsupported {
                extension,
                advisory: DOCX_ADVISORY.to_string(),
            };
        }
        DocumentKind::Text => Some(read_lossy_utf8(document.path())),
        DocumentKind::Pdf => Some(read_pdf(document.path())),
        DocumentKind::Unknown => None,
    };
    let Some(raw) = raw else {
        warn!("Unsupported document format '{}'", extension);
        return ExtractedText::Unsupported {
            advisory: unsupported_advisory(&extension, accepted),
            extension,
        };
    };

    match raw {
        Ok(raw) => {
            let extracted = ExtractedText::from_raw(&raw);
            if let ExtractedText::Text { content, truncated } = &extracted {
                debug!(
                    chars = content.chars().count(),
                    truncated, "Extracted and normalized document text"
                );
            }
            extracted
        }
        Err(e) => {
            warn!("Text extraction failed for {}: {}", document.path().display(), e);
            ExtractedText::Failed {
                message: format!("{EXTRACTION_ERROR_PREFIX} {kind}: {e}"),
            }
        }
    }
}

/// Runs [`extract_document`] on the blocking thread pool.
pub async fn extract_document_blocking(
    document: Option<UploadedDocument>,
    accepted: &'static [DocumentKind],
) -> ExtractedText {
    if document.is_none() {
        return ExtractedText::Absent;
    }
    let kind = document.as_ref().map(|d| d.kind()).unwrap_or(DocumentKind::Unknown);
    tokio::task::spawn_blocking(move || extract_document(document.as_ref(), accepted))
        .await
        .unwrap_or_else(|e| ExtractedText::Failed {
            message: format!("{EXTRACTION_ERROR_PREFIX} {kind}: extraction task failed: {e}"),
        })
}

fn unsupported_advisory(extension: &str, accepted: &[DocumentKind]) -> String {
    let accepted = accepted
        .iter()
        .map(|k| match k {
            DocumentKind::Pdf => ".pdf",
            DocumentKind::Text => ".txt",
            DocumentKind::Docx => ".docx",
            DocumentKind::Unknown => "",
        })
        .filter(|e| !e.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let shown = if extension.is_empty() {
        "(none)"
    } else {
        extension
    };
    format!("Unsupported file format '{shown}'. Please upload one of: {accepted}.")
}

/// Reads a file as UTF-8, dropping undecodable byte sequences.
fn read_lossy_utf8(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path)?;
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    Ok(text)
}

#[cfg(feature = "pdf")]
fn read_pdf(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path)?;
    pdf_text::extract_pdf_text(&bytes)
}

#[cfg(not(feature = "pdf"))]
fn read_pdf(_path: &Path) -> Result<String, ExtractError> {
    Err(ExtractError::Io(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "PDF support was not compiled in",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_detected_case_insensitively() {
        assert_eq!(DocumentKind::from_extension("PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_extension(".Txt"), DocumentKind::Text);
        assert_eq!(DocumentKind::from_extension("docx"), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_extension("odt"), DocumentKind::Unknown);
        assert_eq!(DocumentKind::from_extension(""), DocumentKind::Unknown);
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let text = "é".repeat(MAX_EXTRACTED_CHARS + 5);
        let (cut, truncated) = truncate(text);
        assert!(truncated);
        assert_eq!(
            cut.chars().count(),
            MAX_EXTRACTED_CHARS + TRUNCATION_MARKER.chars().count()
        );
    }

    #[test]
    fn text_at_exact_cap_is_not_truncated() {
        let text = "a".repeat(MAX_EXTRACTED_CHARS);
        let (kept, truncated) = truncate(text.clone());
        assert!(!truncated);
        assert_eq!(kept, text);
    }
}
