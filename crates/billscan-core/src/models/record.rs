//! Structured receipt record produced by the extraction pipeline.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Merchant name used when nothing in the text qualifies.
pub const UNKNOWN_MERCHANT: &str = "Unknown Merchant";

/// A fully parsed receipt.
///
/// Every field is always present. Fields the pipeline could not recover hold
/// their documented defaults (empty string, zero amount, empty list), so
/// consumers never have to deal with a partially constructed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRecord {
    /// Merchant or shop name.
    pub merchant: String,

    /// Date exactly as printed on the receipt (not reformatted).
    pub date: String,

    /// Purchased items.
    pub items: Vec<LineItem>,

    /// Subtotal, tax and grand total.
    pub totals: Totals,

    /// Payment mode (UPI, CARD, CASH, ...).
    pub payment_mode: String,

    /// Payment reference or UPI handle.
    #[serde(rename = "ref")]
    pub reference: String,

    /// Invoice or bill number.
    pub invoice_no: String,

    /// Spending category.
    pub category: Category,

    /// The raw text the record was parsed from.
    pub raw: String,
}

impl ParsedRecord {
    /// Names of the fields that fell back to their defaults.
    ///
    /// Arithmetic between items and totals is not checked.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.merchant == UNKNOWN_MERCHANT {
            missing.push("merchant");
        }
        if self.date.is_empty() {
            missing.push("date");
        }
        if self.items.is_empty() {
            missing.push("items");
        }
        if self.totals.grand.is_zero() {
            missing.push("grand_total");
        }
        if self.payment_mode.is_empty() {
            missing.push("payment_mode");
        }
        if self.invoice_no.is_empty() {
            missing.push("invoice_no");
        }

        missing
    }
}

/// A single purchased item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description.
    pub description: String,

    /// Quantity (1 when not printed).
    pub qty: u32,

    /// Price per unit.
    pub unit: Decimal,

    /// Line total. Not required to equal `qty * unit`.
    pub total: Decimal,
}

impl LineItem {
    /// Single-unit item where unit price and total are the same amount.
    pub fn single(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            description: description.into(),
            qty: 1,
            unit: amount,
            total: amount,
        }
    }
}

/// Receipt totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Amount before tax.
    pub subtotal: Decimal,

    /// Sum of every tax amount found.
    pub tax: Decimal,

    /// Tax amounts keyed by label (CGST, SGST, GST, VAT).
    pub gst: BTreeMap<String, Decimal>,

    /// Amount payable.
    pub grand: Decimal,

    /// Every currency amount in document order.
    pub raw: Vec<Decimal>,
}

/// Spending category assigned from keywords in the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Groceries,
    Dining,
    Health,
    Fuel,
    Electronics,
    #[default]
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Dining => "Dining",
            Category::Health => "Health",
            Category::Fuel => "Fuel",
            Category::Electronics => "Electronics",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
