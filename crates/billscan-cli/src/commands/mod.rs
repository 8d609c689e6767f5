//! Subcommands and the output rendering they share.

pub mod batch;
pub mod config;
pub mod parse;

use std::path::{Path, PathBuf};

use billscan_core::{format_inr, BillscanConfig, ParsedRecord};
use serde::Serialize;
use tracing::debug;

/// Output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per item
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

impl From<billscan_core::OutputFormat> for OutputFormat {
    fn from(format: billscan_core::OutputFormat) -> Self {
        match format {
            billscan_core::OutputFormat::Json => OutputFormat::Json,
            billscan_core::OutputFormat::Csv => OutputFormat::Csv,
            billscan_core::OutputFormat::Text => OutputFormat::Text,
        }
    }
}

/// A parsed record as handed to storage: the record plus caller metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecord<'a> {
    pub file_name: String,
    pub parsed_at: String,
    #[serde(flatten)]
    pub record: &'a ParsedRecord,
}

impl<'a> SavedRecord<'a> {
    pub fn new(path: &Path, record: &'a ParsedRecord) -> Self {
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("stdin")
            .to_string();

        Self {
            file_name,
            parsed_at: chrono::Utc::now().to_rfc3339(),
            record,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("billscan")
        .join("config.json")
}

/// Load the config given on the command line, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BillscanConfig> {
    if let Some(path) = config_path {
        return Ok(BillscanConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        return Ok(BillscanConfig::from_file(&default_path)?);
    }

    Ok(BillscanConfig::default())
}

pub fn format_record(
    saved: &SavedRecord<'_>,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(saved)?),
        OutputFormat::Json => Ok(serde_json::to_string(saved)?),
        OutputFormat::Csv => format_csv(saved.record),
        OutputFormat::Text => Ok(format_text(saved.record)),
    }
}

fn format_csv(record: &ParsedRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "merchant",
        "date",
        "invoice_no",
        "payment_mode",
        "ref",
        "category",
        "description",
        "qty",
        "unit",
        "total",
        "subtotal",
        "tax",
        "grand_total",
    ])?;

    let header = [
        record.merchant.as_str(),
        record.date.as_str(),
        record.invoice_no.as_str(),
        record.payment_mode.as_str(),
        record.reference.as_str(),
        record.category.as_str(),
    ];
    let totals = [
        record.totals.subtotal.to_string(),
        record.totals.tax.to_string(),
        record.totals.grand.to_string(),
    ];

    if record.items.is_empty() {
        wtr.write_record(
            header
                .iter()
                .copied()
                .chain(["", "", "", ""])
                .chain(totals.iter().map(String::as_str)),
        )?;
    }

    for item in &record.items {
        let qty = item.qty.to_string();
        let unit = item.unit.to_string();
        let total = item.total.to_string();
        wtr.write_record(
            header
                .iter()
                .copied()
                .chain([item.description.as_str(), qty.as_str(), unit.as_str(), total.as_str()])
                .chain(totals.iter().map(String::as_str)),
        )?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ParsedRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Merchant: {}\n", record.merchant));
    output.push_str(&format!("Invoice:  {}\n", record.invoice_no));
    output.push_str(&format!("Date:     {}\n", record.date));
    output.push_str(&format!("Payment:  {}", record.payment_mode));
    if !record.reference.is_empty() {
        output.push_str(&format!(" (ref {})", record.reference));
    }
    output.push('\n');
    output.push_str(&format!("Category: {}\n", record.category));
    output.push('\n');

    if !record.items.is_empty() {
        output.push_str("Items:\n");
        for (i, item) in record.items.iter().enumerate() {
            output.push_str(&format!(
                "  {:>2}. {} x{} @ ₹{} = ₹{}\n",
                i + 1,
                item.description,
                item.qty,
                format_inr(item.unit),
                format_inr(item.total)
            ));
        }
        output.push('\n');
    }

    output.push_str("Totals:\n");
    output.push_str(&format!("  Subtotal: ₹{}\n", format_inr(record.totals.subtotal)));
    output.push_str(&format!("  Tax:      ₹{}\n", format_inr(record.totals.tax)));
    for (label, amount) in &record.totals.gst {
        output.push_str(&format!("    {}: ₹{}\n", label, format_inr(*amount)));
    }
    output.push_str(&format!("  Grand:    ₹{}\n", format_inr(record.totals.grand)));

    output
}
