//! Line item extraction.
//!
//! Items are recovered by a chain of tiers, from strict column layouts down to
//! a bare "description ₹amount" match. The first tier that yields anything
//! wins; lower tiers are not consulted.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, trace};

use crate::models::config::ExtractionConfig;
use crate::models::record::LineItem;

use super::rules::amounts::{last_amount, parse_amount};
use super::rules::patterns::{
    DECIMAL_NUMBER, GROUPED_NUMBER, ITEM_COLUMNS, ITEM_LAST_RESORT, ITEM_STRUCTURAL, MONEY,
    SMALL_INTEGER, TWO_DIGIT_RUN,
};

/// One fallback level of item extraction.
pub trait ItemTier: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Extract items, empty when this tier recognises nothing.
    fn extract(&self, lines: &[String]) -> Vec<LineItem>;
}

/// Aligned columns: description, quantity, unit price, line total.
///
/// `Wireless Keyboard 2 1,299.00 2,598.00`
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredColumns;

impl ItemTier for StructuredColumns {
    fn name(&self) -> &'static str {
        "structured-columns"
    }

    fn extract(&self, lines: &[String]) -> Vec<LineItem> {
        lines
            .iter()
            .filter_map(|line| {
                let caps = ITEM_COLUMNS.captures(line)?;
                let qty = caps[2].parse::<u32>().ok()?.max(1);
                Some(LineItem {
                    description: caps[1].trim().to_string(),
                    qty,
                    unit: parse_amount(&caps[3]),
                    total: parse_amount(&caps[4]),
                })
            })
            .collect()
    }
}

/// Any non-structural line carrying a rupee amount.
///
/// The last amount is the line total. The quantity is the first standalone
/// one- or two-digit integer with no two-digit run after it on the line; this
/// misreads lines where the quantity precedes the price, and is kept as is.
#[derive(Debug, Clone)]
pub struct HeuristicAmounts {
    placeholder: String,
}

impl HeuristicAmounts {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    fn parse_line(&self, line: &str) -> Option<LineItem> {
        if ITEM_STRUCTURAL.is_match(line) {
            return None;
        }

        let total = last_amount(line)?;
        let qty = infer_quantity(line);

        let before_currency = line.split('₹').next().unwrap_or_default();
        let description = GROUPED_NUMBER.replace_all(before_currency, "");
        let description = match description.trim() {
            "" => self.placeholder.clone(),
            d => d.to_string(),
        };

        let unit = (total / Decimal::from(qty))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        trace!("Heuristic item '{}' qty {} total {}", description, qty, total);

        Some(LineItem {
            description,
            qty,
            unit,
            total,
        })
    }
}

impl Default for HeuristicAmounts {
    fn default() -> Self {
        Self::new(ExtractionConfig::default().item_placeholder)
    }
}

impl ItemTier for HeuristicAmounts {
    fn name(&self) -> &'static str {
        "heuristic-amounts"
    }

    fn extract(&self, lines: &[String]) -> Vec<LineItem> {
        lines.iter().filter_map(|line| self.parse_line(line)).collect()
    }
}

/// Any "description ₹amount" line, structural or not, as a single unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastResort;

impl ItemTier for LastResort {
    fn name(&self) -> &'static str {
        "last-resort"
    }

    fn extract(&self, lines: &[String]) -> Vec<LineItem> {
        lines
            .iter()
            .filter_map(|line| {
                let caps = ITEM_LAST_RESORT.captures(line)?;
                Some(LineItem::single(caps[1].trim(), parse_amount(&caps[2])))
            })
            .collect()
    }
}

/// First standalone small integer not followed by a two-digit run.
///
/// Digits belonging to a currency amount or a decimal number are not
/// standalone, and zero is never a quantity. Defaults to 1.
fn infer_quantity(line: &str) -> u32 {
    let taken: Vec<_> = MONEY
        .find_iter(line)
        .chain(DECIMAL_NUMBER.find_iter(line))
        .map(|m| m.range())
        .collect();

    SMALL_INTEGER
        .find_iter(line)
        .filter(|m| !taken.iter().any(|r| r.start <= m.start() && m.end() <= r.end))
        .filter_map(|m| Some((m.end(), m.as_str().parse::<u32>().ok()?)))
        .filter(|(_, qty)| *qty > 0)
        .find(|(end, _)| !TWO_DIGIT_RUN.is_match(&line[*end..]))
        .map(|(_, qty)| qty)
        .unwrap_or(1)
}

/// Ordered chain of item tiers.
pub struct ItemExtractor {
    tiers: Vec<Box<dyn ItemTier>>,
}

impl ItemExtractor {
    /// Structured, heuristic, then last-resort tiers.
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            tiers: vec![
                Box::new(StructuredColumns),
                Box::new(HeuristicAmounts::new(config.item_placeholder.clone())),
                Box::new(LastResort),
            ],
        }
    }

    /// Build a chain from custom tiers.
    pub fn with_tiers(tiers: Vec<Box<dyn ItemTier>>) -> Self {
        Self { tiers }
    }

    /// Names of the tiers in the order they are tried.
    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    pub fn extract(&self, lines: &[String]) -> Vec<LineItem> {
        for tier in &self.tiers {
            let items = tier.extract(lines);
            if !items.is_empty() {
                debug!("Item tier '{}' produced {} items", tier.name(), items.len());
                return items;
            }
        }

        debug!("No line items recognised");
        Vec::new()
    }
}

impl Default for ItemExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl std::fmt::Debug for ItemExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemExtractor")
            .field("tiers", &self.tier_names())
            .finish()
    }
}

/// Extract line items with the default tier chain.
pub fn extract_items(lines: &[String]) -> Vec<LineItem> {
    ItemExtractor::default().extract(lines)
}
