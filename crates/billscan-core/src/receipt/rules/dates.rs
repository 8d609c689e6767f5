//! Date detection.
//!
//! The date is returned verbatim as printed; nothing is reformatted.

use lazy_static::lazy_static;

use super::patterns::{DATE_DAY_MONTH_NAME, DATE_ISO, DATE_MONTH_YEAR, DATE_NUMERIC_DMY};
use super::{first_match, PatternStrategy};

lazy_static! {
    /// Date patterns in priority order. An earlier pattern shadows later ones
    /// even when a later one also matches.
    pub static ref DATE_STRATEGIES: [PatternStrategy; 4] = [
        PatternStrategy::new("day-month-name-year", &DATE_DAY_MONTH_NAME, 1),
        PatternStrategy::new("day-month-year", &DATE_NUMERIC_DMY, 1),
        PatternStrategy::new("year-month-day", &DATE_ISO, 1),
        PatternStrategy::new("month-name-year", &DATE_MONTH_YEAR, 1),
    ];
}

/// Detect the receipt date in the joined text, empty when none is found.
pub fn detect_date(text: &str) -> String {
    first_match(DATE_STRATEGIES.iter(), text).unwrap_or_default()
}
