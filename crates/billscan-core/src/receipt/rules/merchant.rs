//! Merchant name detection.

use tracing::trace;

use super::patterns::{MERCHANT_EXCLUDE, UPPER_ONLY};
use super::{first_match, FieldStrategy};
use crate::models::config::ExtractionConfig;

/// Retail brand and shop-type terms, searched in this order.
pub const BRAND_KEYWORDS: &[&str] = &[
    "megamart",
    "mart",
    "supermarket",
    "hyperstore",
    "store",
    "shop",
    "bazaar",
    "pharmacy",
    "d-mart",
    "dmart",
    "reliance",
    "bigbazaar",
];

/// Picks the first shouty heading line near the top of the receipt.
#[derive(Debug, Clone)]
pub struct UppercaseHeading {
    scan_lines: usize,
    upper_ratio: f64,
}

impl UppercaseHeading {
    pub fn new(scan_lines: usize, upper_ratio: f64) -> Self {
        Self {
            scan_lines,
            upper_ratio,
        }
    }

    fn accepts(&self, line: &str) -> bool {
        let len = line.chars().count();
        if len <= 3 || !line.chars().any(|c| c.is_ascii_uppercase()) {
            return false;
        }
        if MERCHANT_EXCLUDE.is_match(line) {
            return false;
        }

        let upper = line.chars().filter(|c| c.is_ascii_uppercase()).count();
        let ratio = upper as f64 / len.max(1) as f64;
        trace!("Merchant candidate '{}' upper ratio {:.2}", line, ratio);

        ratio > self.upper_ratio || UPPER_ONLY.is_match(line)
    }
}

impl Default for UppercaseHeading {
    fn default() -> Self {
        let config = ExtractionConfig::default();
        Self::new(config.merchant_scan_lines, config.merchant_upper_ratio)
    }
}

impl FieldStrategy<[String], String> for UppercaseHeading {
    fn name(&self) -> &'static str {
        "uppercase-heading"
    }

    fn attempt(&self, lines: &[String]) -> Option<String> {
        lines
            .iter()
            .take(self.scan_lines)
            .find(|line| self.accepts(line))
            .cloned()
    }
}

/// Looks for a known brand or shop-type word anywhere in the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrandKeyword;

impl FieldStrategy<[String], String> for BrandKeyword {
    fn name(&self) -> &'static str {
        "brand-keyword"
    }

    fn attempt(&self, lines: &[String]) -> Option<String> {
        let text = lines.join(" ").to_lowercase();
        BRAND_KEYWORDS
            .iter()
            .find(|keyword| text.contains(*keyword))
            .map(|keyword| keyword.to_uppercase())
    }
}

/// Falls back to the first line of the receipt.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLine;

impl FieldStrategy<[String], String> for FirstLine {
    fn name(&self) -> &'static str {
        "first-line"
    }

    fn attempt(&self, lines: &[String]) -> Option<String> {
        lines.first().cloned()
    }
}

/// Merchant detector running heading, brand and first-line strategies in order.
#[derive(Debug, Clone)]
pub struct MerchantDetector {
    heading: UppercaseHeading,
    unknown: String,
}

impl MerchantDetector {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            heading: UppercaseHeading::new(config.merchant_scan_lines, config.merchant_upper_ratio),
            unknown: config.unknown_merchant.clone(),
        }
    }

    /// Strategies in priority order.
    pub fn strategies(&self) -> [&dyn FieldStrategy<[String], String>; 3] {
        [&self.heading, &BrandKeyword, &FirstLine]
    }

    pub fn detect(&self, lines: &[String]) -> String {
        first_match(self.strategies(), lines).unwrap_or_else(|| self.unknown.clone())
    }
}

impl Default for MerchantDetector {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

/// Detect the merchant name with default settings.
pub fn detect_merchant(lines: &[String]) -> String {
    MerchantDetector::default().detect(lines)
}
