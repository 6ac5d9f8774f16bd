use std::panic;

use crate::extraction::{DocumentFormat, ExtractionError, TextExtractor};

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    /// The PDF parser can panic on malformed input; the panic is contained here.
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ExtractionError::extraction(DocumentFormat::Pdf, e)),
            Err(_) => Err(ExtractionError::extraction(
                DocumentFormat::Pdf,
                "PDF parser aborted on malformed input",
            )),
        }
    }
}
