//! Receipt field extraction module.

pub mod items;
mod parser;
pub mod rules;

pub use items::{extract_items, ItemExtractor, ItemTier};
pub use parser::{parse_receipt, ReceiptParser};
