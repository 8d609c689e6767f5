//! Text acquisition adapters.
//!
//! The extraction pipeline only consumes text. These adapters turn documents
//! into that text and are the only fallible part of a parse run.

#[cfg(feature = "pdf")]
mod pdf;

#[cfg(feature = "pdf")]
pub use pdf::PdfTextSource;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{InputError, Result, SourceError};
use crate::models::config::SourceConfig;

/// Something that can turn document bytes into raw text.
pub trait TextSource {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Whether this source handles files with the given (lower-case) extension.
    fn handles(&self, extension: &str) -> bool;

    /// Read raw text from document bytes.
    fn read_text(&self, data: &[u8]) -> Result<String>;
}

/// UTF-8 text files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn name(&self) -> &'static str {
        "text"
    }

    fn handles(&self, extension: &str) -> bool {
        matches!(extension, "txt" | "text")
    }

    fn read_text(&self, data: &[u8]) -> Result<String> {
        let data = data.strip_prefix(b"\xef\xbb\xbf".as_slice()).unwrap_or(data);
        let text = std::str::from_utf8(data).map_err(|e| InputError::NotText {
            offset: e.valid_up_to(),
        })?;
        Ok(text.to_string())
    }
}

/// All sources available in this build, in lookup order.
pub fn available_sources() -> Vec<Box<dyn TextSource>> {
    let mut sources: Vec<Box<dyn TextSource>> = vec![Box::new(PlainTextSource)];
    #[cfg(feature = "pdf")]
    sources.push(Box::new(PdfTextSource));
    sources
}

/// Whether some source handles this path.
pub fn is_supported(path: &Path) -> bool {
    let extension = extension_of(path);
    available_sources().iter().any(|s| s.handles(&extension))
}

/// Read raw text from bytes, choosing the source by file extension.
pub fn read_text(extension: &str, data: &[u8], config: &SourceConfig) -> Result<String> {
    let extension = extension.to_lowercase();
    let sources = available_sources();
    let source = sources
        .iter()
        .find(|s| s.handles(&extension))
        .ok_or_else(|| SourceError::Unsupported(extension.clone()))?;

    check_size(data.len() as u64, config)?;

    let text = source.read_text(data)?;
    let length = text.chars().filter(|c| !c.is_whitespace()).count();
    debug!("Source '{}' produced {} characters of text", source.name(), length);

    if length < config.min_text_length {
        warn!("Source '{}' produced too little text ({} characters)", source.name(), length);
        return Err(SourceError::Empty(source.name().to_string()).into());
    }

    Ok(text)
}

/// Read raw text from a file on disk.
pub fn load_text(path: &Path, config: &SourceConfig) -> Result<String> {
    let extension = extension_of(path);
    if !available_sources().iter().any(|s| s.handles(&extension)) {
        return Err(SourceError::Unsupported(extension).into());
    }

    check_size(std::fs::metadata(path)?.len(), config)?;

    let data = std::fs::read(path)?;
    read_text(&extension, &data, config)
}

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Reject documents over the configured limit, compared in bytes.
fn check_size(len: u64, config: &SourceConfig) -> Result<()> {
    if len > config.max_file_size_mb.saturating_mul(BYTES_PER_MB) {
        return Err(SourceError::TooLarge {
            size_mb: len.div_ceil(BYTES_PER_MB),
            limit_mb: config.max_file_size_mb,
        }
        .into());
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BillscanError;

    #[test]
    fn test_plain_text_strips_bom() {
        let text = PlainTextSource.read_text(b"\xef\xbb\xbfFRESH MART").unwrap();
        assert_eq!(text, "FRESH MART");
    }

    #[test]
    fn test_plain_text_rejects_binary() {
        let err = PlainTextSource.read_text(b"ok\xff").unwrap_err();
        assert!(matches!(err, BillscanError::Input(InputError::NotText { offset: 2 })));
    }

    #[test]
    fn test_read_text_unsupported_extension() {
        let err = read_text("png", b"", &SourceConfig::default()).unwrap_err();
        assert!(matches!(err, BillscanError::Source(SourceError::Unsupported(ext)) if ext == "png"));
    }

    #[test]
    fn test_read_text_empty_document() {
        let err = read_text("txt", b"  \n\t ", &SourceConfig::default()).unwrap_err();
        assert!(matches!(err, BillscanError::Source(SourceError::Empty(_))));
    }

    #[test]
    fn test_load_text_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bill.TXT");
        std::fs::write(&path, "CAFE\nCoffee ₹90").unwrap();

        assert!(is_supported(&path));
        assert_eq!(load_text(&path, &SourceConfig::default()).unwrap(), "CAFE\nCoffee ₹90");
    }

    #[test]
    fn test_size_limit_counts_bytes() {
        let config = SourceConfig {
            max_file_size_mb: 1,
            ..SourceConfig::default()
        };
        let at_limit = vec![b'a'; 1024 * 1024];
        let over_limit = vec![b'a'; 1024 * 1024 + 1];

        assert!(read_text("txt", &at_limit, &config).is_ok());
        let err = read_text("txt", &over_limit, &config).unwrap_err();
        assert!(matches!(
            err,
            BillscanError::Source(SourceError::TooLarge { size_mb: 2, limit_mb: 1 })
        ));
    }

    #[test]
    fn test_load_text_checks_size_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        std::fs::write(&path, vec![b'a'; 1024 * 1024 + 10]).unwrap();
        let config = SourceConfig {
            max_file_size_mb: 1,
            ..SourceConfig::default()
        };

        let err = load_text(&path, &config).unwrap_err();
        assert!(matches!(err, BillscanError::Source(SourceError::TooLarge { .. })));
    }

    #[test]
    fn test_image_files_not_supported() {
        assert!(!is_supported(Path::new("scan.jpg")));
    }
}
