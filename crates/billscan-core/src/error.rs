//! Error types for the billscan-core library.

use thiserror::Error;

/// Main error type for the billscan library.
#[derive(Error, Debug)]
pub enum BillscanError {
    /// The input could not be treated as text.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Text acquisition from a document failed.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised when the input handed to the parser is not usable text.
#[derive(Error, Debug)]
pub enum InputError {
    /// The bytes are not valid UTF-8.
    #[error("input is not valid UTF-8 text (invalid byte at offset {offset})")]
    NotText { offset: usize },
}

/// Errors related to acquiring raw text from a document.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The document yielded no usable text.
    #[error("no text found in {0}")]
    Empty(String),

    /// The document is larger than the configured limit.
    #[error("file is {size_mb} MB, limit is {limit_mb} MB")]
    TooLarge { size_mb: u64, limit_mb: u64 },

    /// No text source handles this kind of file.
    #[error("unsupported file format: {0}")]
    Unsupported(String),
}

/// Result type for the billscan library.
pub type Result<T> = std::result::Result<T, BillscanError>;
