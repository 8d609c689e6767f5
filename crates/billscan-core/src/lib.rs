//! Core library for receipt and invoice text extraction.
//!
//! This crate provides:
//! - A pure, line-oriented extraction pipeline turning OCR or PDF text into a
//!   structured record (merchant, date, items, totals, payment, category)
//! - Rupee amount parsing and Indian-grouped display
//! - Configuration types shared with callers
//! - Text acquisition adapters for plain text and PDF text layers

pub mod error;
pub mod models;
pub mod receipt;
pub mod source;

pub use error::{BillscanError, InputError, Result, SourceError};
pub use models::config::{BillscanConfig, ExtractionConfig, OutputConfig, OutputFormat, SourceConfig};
pub use models::record::{Category, LineItem, ParsedRecord, Totals, UNKNOWN_MERCHANT};
pub use receipt::rules::format_inr;
pub use receipt::{parse_receipt, ReceiptParser};
pub use source::{load_text, TextSource};
