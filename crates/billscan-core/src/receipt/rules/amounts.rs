//! Rupee amount parsing and display.
//!
//! A currency amount is a `₹` sign, an optional space, digits with optional
//! thousands separators and an optional fraction of up to two digits. This is
//! the only place that knows that grammar; totals and item extraction both go
//! through it.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::MONEY;

/// Parse the numeric part of an amount (e.g. "1,299.00").
///
/// Malformed input yields zero and the result is never negative.
pub fn parse_amount(s: &str) -> Decimal {
    let cleaned = s.trim().replace(',', "");
    Decimal::from_str(&cleaned)
        .map(|amount| amount.max(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO)
}

/// All currency amounts in a line, in order.
pub fn amounts_in(line: &str) -> Vec<Decimal> {
    MONEY
        .captures_iter(line)
        .map(|caps| parse_amount(&caps[1]))
        .collect()
}

/// First currency amount in a line.
pub fn first_amount(line: &str) -> Option<Decimal> {
    MONEY.captures(line).map(|caps| parse_amount(&caps[1]))
}

/// Last currency amount in a line.
pub fn last_amount(line: &str) -> Option<Decimal> {
    MONEY
        .captures_iter(line)
        .last()
        .map(|caps| parse_amount(&caps[1]))
}

/// Format an amount with Indian digit grouping (12,34,567.50).
pub fn format_inr(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.round_dp(2));
    let (sign, s) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s, "00"));

    // Last three digits form one group, everything before is grouped in pairs
    let digits: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    if digits.len() > 3 {
        let head = &digits[..digits.len() - 3];
        for (i, c) in head.iter().enumerate() {
            if i > 0 && (head.len() - i) % 2 == 0 {
                formatted.push(',');
            }
            formatted.push(*c);
        }
        formatted.push(',');
        formatted.extend(&digits[digits.len() - 3..]);
    } else {
        formatted.extend(&digits);
    }

    format!("{}{}.{}", sign, formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,299.00"), dec("1299.00"));
        assert_eq!(parse_amount("45"), dec("45"));
        assert_eq!(parse_amount("12,34,567.5"), dec("1234567.5"));
    }

    #[test]
    fn test_parse_amount_malformed_is_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount(",,"), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_clamps_negative() {
        assert_eq!(parse_amount("-12.50"), Decimal::ZERO);
    }

    #[test]
    fn test_amounts_in_line() {
        let line = "Rice 5kg ₹ 250.00 Dal ₹1,120.5";
        assert_eq!(amounts_in(line), vec![dec("250.00"), dec("1120.5")]);
        assert_eq!(first_amount(line), Some(dec("250.00")));
        assert_eq!(last_amount(line), Some(dec("1120.5")));
    }

    #[test]
    fn test_amounts_require_rupee_sign() {
        assert!(amounts_in("Total 500.00").is_empty());
        assert_eq!(last_amount("Total 500.00"), None);
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(dec("0")), "0.00");
        assert_eq!(format_inr(dec("999.5")), "999.50");
        assert_eq!(format_inr(dec("1234.56")), "1,234.56");
        assert_eq!(format_inr(dec("123456")), "1,23,456.00");
        assert_eq!(format_inr(dec("1234567.5")), "12,34,567.50");
        assert_eq!(format_inr(dec("123456789")), "12,34,56,789.00");
    }
}
