//! Configuration structures for the extraction pipeline and its callers.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{BillscanError, Result};

use super::record::UNKNOWN_MERCHANT;

/// Main configuration for billscan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillscanConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Text acquisition configuration.
    pub source: SourceConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// How many leading lines are considered for the merchant name.
    pub merchant_scan_lines: usize,

    /// Share of uppercase letters above which a line reads as a merchant name.
    pub merchant_upper_ratio: f64,

    /// Description given to items whose text is only numbers.
    pub item_placeholder: String,

    /// Merchant name used when nothing qualifies.
    pub unknown_merchant: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            merchant_scan_lines: 6,
            merchant_upper_ratio: 0.2,
            item_placeholder: "Item".to_string(),
            unknown_merchant: UNKNOWN_MERCHANT.to_string(),
        }
    }
}

/// Text acquisition configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Minimum number of non-whitespace characters a document must yield.
    pub min_text_length: usize,

    /// Largest accepted input file in megabytes.
    pub max_file_size_mb: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            min_text_length: 1,
            max_file_size_mb: 20,
        }
    }
}

/// Output rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when none is given on the command line.
    pub default_format: OutputFormat,

    /// Indent JSON output.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Json,
            pretty_json: false,
        }
    }
}

/// Rendering format for parsed records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Text,
}

impl BillscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| BillscanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| BillscanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
