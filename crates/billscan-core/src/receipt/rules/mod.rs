//! Rule-based field detectors for receipts.
//!
//! Each field is detected by an ordered list of strategies. The first
//! strategy that produces a value wins, so the order of a list is its
//! priority.

pub mod amounts;
pub mod category;
pub mod dates;
pub mod merchant;
pub mod normalize;
pub mod payment;
pub mod patterns;
pub mod totals;

pub use amounts::{amounts_in, first_amount, format_inr, last_amount, parse_amount};
pub use category::{categorize, CATEGORY_RULES};
pub use dates::{detect_date, DATE_STRATEGIES};
pub use merchant::{detect_merchant, MerchantDetector};
pub use normalize::normalize_lines;
pub use payment::{detect_invoice_number, detect_payment_mode, detect_reference};
pub use totals::detect_totals;

use regex::Regex;
use tracing::debug;

/// One way of detecting a field.
pub trait FieldStrategy<I: ?Sized, T> {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Try to detect the field, `None` when this strategy does not apply.
    fn attempt(&self, input: &I) -> Option<T>;
}

/// Run strategies in order and return the first value produced.
pub fn first_match<'a, I, T, S>(strategies: impl IntoIterator<Item = &'a S>, input: &I) -> Option<T>
where
    I: ?Sized,
    S: FieldStrategy<I, T> + ?Sized + 'a,
{
    strategies.into_iter().find_map(|strategy| {
        let value = strategy.attempt(input)?;
        debug!("Strategy '{}' matched", strategy.name());
        Some(value)
    })
}

/// Strategy that returns one capture group of a regex.
#[derive(Debug, Clone, Copy)]
pub struct PatternStrategy {
    name: &'static str,
    pattern: &'static Regex,
    group: usize,
}

impl PatternStrategy {
    pub fn new(name: &'static str, pattern: &'static Regex, group: usize) -> Self {
        Self { name, pattern, group }
    }
}

impl FieldStrategy<str, String> for PatternStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn attempt(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(self.group))
            .map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref DIGITS: Regex = Regex::new(r"(\d+)").unwrap();
        static ref WORD: Regex = Regex::new(r"([a-z]+)").unwrap();
    }

    #[test]
    fn test_first_match_respects_order() {
        let strategies = [
            PatternStrategy::new("digits", &DIGITS, 1),
            PatternStrategy::new("word", &WORD, 1),
        ];

        assert_eq!(first_match(&strategies, "abc 123"), Some("123".to_string()));
        assert_eq!(first_match(&strategies, "abc"), Some("abc".to_string()));
        assert_eq!(first_match(&strategies, "!!"), None::<String>);
    }

    #[test]
    fn test_pattern_strategy_group_zero() {
        let strategy = PatternStrategy::new("whole", &DIGITS, 0);
        assert_eq!(strategy.attempt("no 42 here"), Some("42".to_string()));
    }
}
