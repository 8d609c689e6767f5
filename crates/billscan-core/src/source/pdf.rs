//! PDF text layer extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::TextSource;
use crate::error::{Result, SourceError};

/// Reads the embedded text layer of a PDF. Scanned PDFs without a text layer
/// yield no text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl PdfTextSource {
    /// Load the document, decrypting PDFs protected by an empty password, and
    /// return bytes pdf-extract can read.
    fn prepare(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut doc = Document::load_mem(data).map_err(|e| SourceError::Parse(e.to_string()))?;

        if doc.get_pages().is_empty() {
            return Err(SourceError::NoPages.into());
        }

        if !doc.is_encrypted() {
            return Ok(data.to_vec());
        }

        if doc.decrypt("").is_err() {
            return Err(SourceError::Encrypted.into());
        }
        debug!("Decrypted PDF with empty password");

        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| SourceError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
        Ok(decrypted)
    }
}

impl TextSource for PdfTextSource {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn handles(&self, extension: &str) -> bool {
        extension == "pdf"
    }

    fn read_text(&self, data: &[u8]) -> Result<String> {
        let data = self.prepare(data)?;
        let text = pdf_extract::extract_text_from_mem(&data)
            .map_err(|e| SourceError::TextExtraction(e.to_string()))?;
        Ok(text)
    }
}
