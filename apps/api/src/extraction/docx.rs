//! DOCX text extraction: reads `word/document.xml` out of the zip container
//! and keeps the contents of `<w:t>` runs.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::extraction::{DocumentFormat, ExtractionError, TextExtractor};

const DOCUMENT_PART: &str = "word/document.xml";

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let xml = read_document_part(bytes)
            .map_err(|e| ExtractionError::extraction(DocumentFormat::Docx, e))?;
        document_xml_to_text(&xml)
    }
}

fn read_document_part(bytes: &[u8]) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| format!("not a valid DOCX container: {e}"))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| format!("missing {DOCUMENT_PART}: {e}"))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| format!("unreadable {DOCUMENT_PART}: {e}"))?;
    Ok(xml)
}

/// Paragraph ends become newlines, `<w:tab/>` a tab, `<w:br/>` and `<w:cr/>` a newline.
fn document_xml_to_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_run_text => {
                let unescaped = t
                    .unescape()
                    .map_err(|e| ExtractionError::extraction(DocumentFormat::Docx, e))?;
                text.push_str(&unescaped);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::extraction(
                    DocumentFormat::Docx,
                    format!("malformed XML at position {}: {e}", reader.buffer_position()),
                ))
            }
            _ => {}
        }
    }

    Ok(text)
}
