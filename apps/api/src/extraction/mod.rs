//! Document Text Extraction: converts uploaded document bytes into plain text.
//!
//! Dispatch is by declared MIME type onto a `TextExtractor` per supported
//! format. CPU-bound; callers run it inside `tokio::task::spawn_blocking`.

use std::fmt;

use thiserror::Error;

pub mod docx;
pub mod pdf;
pub mod storage;

pub use storage::TempDocument;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOC_MIME: &str = "application/msword";

/// MIME types accepted at the upload boundary. `DOC_MIME` is accepted but has
/// no extractor, so it fails later with `UnsupportedFormat`.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = [PDF_MIME, DOC_MIME, DOCX_MIME];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Maps a declared MIME type (parameters and case ignored) to a format.
    pub fn from_mime(mime: &str) -> Result<Self, ExtractionError> {
        match essence(mime).as_str() {
            PDF_MIME => Ok(DocumentFormat::Pdf),
            DOCX_MIME => Ok(DocumentFormat::Docx),
            _ => Err(ExtractionError::UnsupportedFormat(mime.to_string())),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => f.write_str("PDF"),
            DocumentFormat::Docx => f.write_str("DOCX"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to extract text from {format} document: {cause}")]
    Extraction {
        format: DocumentFormat,
        cause: String,
    },
}

impl ExtractionError {
    pub fn extraction(format: DocumentFormat, cause: impl fmt::Display) -> Self {
        ExtractionError::Extraction {
            format,
            cause: cause.to_string(),
        }
    }
}

/// One extraction capability.
pub trait TextExtractor: Send + Sync {
    fn format(&self) -> DocumentFormat;
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

fn extractor_for(format: DocumentFormat) -> &'static dyn TextExtractor {
    match format {
        DocumentFormat::Pdf => &pdf::PdfExtractor,
        DocumentFormat::Docx => &docx::DocxExtractor,
    }
}

/// Extracts plain text from `bytes` declared as `mime`.
///
/// Unsupported MIME types fail before any parsing. A document that yields
/// only whitespace is an extraction failure.
pub fn extract(bytes: &[u8], mime: &str) -> Result<String, ExtractionError> {
    let format = DocumentFormat::from_mime(mime)?;
    let extractor = extractor_for(format);
    let text = extractor.extract_text(bytes)?;

    if text.trim().is_empty() {
        return Err(ExtractionError::extraction(
            extractor.format(),
            "document contains no extractable text",
        ));
    }

    Ok(text)
}

/// Whether the upload boundary accepts `mime`.
pub fn is_accepted_mime(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&essence(mime).as_str())
}

fn essence(mime: &str) -> String {
    mime.split(';').next().unwrap_or_default().trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_is_unsupported() {
        let result = extract(&[0x89, b'P', b'N', b'G'], "image/png");
        assert!(matches!(result, Err(ExtractionError::UnsupportedFormat(m)) if m == "image/png"));
    }

    #[test]
    fn test_legacy_doc_is_unsupported() {
        let result = extract(b"\xD0\xCF\x11\xE0", DOC_MIME);
        assert!(matches!(result, Err(ExtractionError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_mime_parameters_and_case_are_ignored() {
        assert_eq!(
            DocumentFormat::from_mime("Application/PDF; charset=binary").unwrap(),
            DocumentFormat::Pdf
        );
        assert!(is_accepted_mime("application/msword"));
        assert!(!is_accepted_mime("text/plain"));
    }

    #[test]
    fn test_garbage_pdf_is_extraction_error() {
        let result = extract(b"this is not a pdf", PDF_MIME);
        assert!(matches!(
            result,
            Err(ExtractionError::Extraction {
                format: DocumentFormat::Pdf,
                ..
            })
        ));
    }

    #[test]
    fn test_docx_round_trip_through_dispatch() {
        let bytes = docx::tests::build_docx(&["Jane Doe", "Skills: Rust, SQL"]);
        let text = extract(&bytes, DOCX_MIME).unwrap();
        assert_eq!(text, "Jane Doe\nSkills: Rust, SQL\n");
    }

    #[test]
    fn test_blank_docx_is_extraction_error() {
        let bytes = docx::tests::build_docx(&["   "]);
        let result = extract(&bytes, DOCX_MIME);
        assert!(matches!(
            result,
            Err(ExtractionError::Extraction { cause, .. }) if cause.contains("no extractable text")
        ));
    }
}
