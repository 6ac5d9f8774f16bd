use std::io::{self, Read, Seek, SeekFrom, Write};

use tempfile::NamedTempFile;

use crate::extraction::{extract, DocumentFormat, ExtractionError};

/// An uploaded document held in a temporary file for the duration of one request.
///
/// The file is removed when the value is dropped, which also covers a request
/// future being cancelled mid-flight.
pub struct TempDocument {
    file: NamedTempFile,
    mime: String,
}

impl TempDocument {
    pub fn persist(bytes: &[u8], mime: &str) -> io::Result<Self> {
        let mut file = NamedTempFile::with_prefix("resume-")?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self {
            file,
            mime: mime.to_string(),
        })
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Extracts text and deletes the temporary file.
    pub fn extract_text(mut self) -> Result<String, ExtractionError> {
        let format = DocumentFormat::from_mime(&self.mime)?;
        let bytes = self.read_back().map_err(|e| {
            ExtractionError::extraction(format, format!("temporary document unreadable: {e}"))
        })?;
        extract(&bytes, &self.mime)
    }

    fn read_back(&mut self) -> io::Result<Vec<u8>> {
        let file = self.file.as_file_mut();
        file.seek(SeekFrom::Start(0))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}
