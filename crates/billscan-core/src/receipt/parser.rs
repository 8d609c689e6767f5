//! Receipt parser composing the field detectors into one record.

use tracing::info;

use crate::error::InputError;
use crate::models::config::ExtractionConfig;
use crate::models::record::ParsedRecord;

use super::items::ItemExtractor;
use super::rules::{
    categorize, detect_date, detect_invoice_number, detect_payment_mode, detect_reference,
    detect_totals, normalize_lines, MerchantDetector,
};

/// Turns raw receipt text into a [`ParsedRecord`].
///
/// Parsing has no side effects and keeps no state between calls, so one parser
/// can be shared across threads.
#[derive(Debug)]
pub struct ReceiptParser {
    merchant: MerchantDetector,
    items: ItemExtractor,
}

impl ReceiptParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            merchant: MerchantDetector::new(config),
            items: ItemExtractor::new(config),
        }
    }

    /// Replace the item tier chain.
    pub fn with_item_extractor(mut self, items: ItemExtractor) -> Self {
        self.items = items;
        self
    }

    /// Parse receipt text. Never fails: missing fields get their defaults.
    pub fn parse(&self, text: &str) -> ParsedRecord {
        let lines = normalize_lines(text);
        let joined = lines.join("\n");

        let record = ParsedRecord {
            merchant: self.merchant.detect(&lines),
            date: detect_date(&joined),
            items: self.items.extract(&lines),
            totals: detect_totals(&lines),
            payment_mode: detect_payment_mode(&joined),
            reference: detect_reference(&joined),
            invoice_no: detect_invoice_number(&joined),
            category: categorize(&joined),
            raw: text.to_string(),
        };

        info!(
            "Parsed receipt from '{}': {} lines, {} items, grand total {}, category {}",
            record.merchant,
            lines.len(),
            record.items.len(),
            record.totals.grand,
            record.category
        );

        record
    }

    /// Parse receipt text given as bytes, which must be UTF-8.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedRecord, InputError> {
        let text = std::str::from_utf8(bytes).map_err(|e| InputError::NotText {
            offset: e.valid_up_to(),
        })?;
        Ok(self.parse(text))
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse receipt text with default settings.
pub fn parse_receipt(text: &str) -> ParsedRecord {
    ReceiptParser::new().parse(text)
}
