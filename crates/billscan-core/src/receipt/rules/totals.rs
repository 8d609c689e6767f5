//! Subtotal, tax and grand total detection.

use tracing::{debug, trace};

use crate::models::record::Totals;

use super::amounts::{amounts_in, first_amount, last_amount, parse_amount};
use super::patterns::{GRAND_TOTAL_LABEL, SUBTOTAL_LABEL, TAX_BREAKDOWN, TAX_KEYWORD};

/// Detect totals from normalized lines.
///
/// Labelled lines set the subtotal and grand total (last one wins). Tax lines
/// are accumulated, per label when the label can be read. When labels are
/// missing, the last amount on the receipt is taken as the grand total and the
/// one before it as the subtotal.
pub fn detect_totals(lines: &[String]) -> Totals {
    let mut totals = Totals::default();

    for line in lines {
        if SUBTOTAL_LABEL.is_match(line) {
            if let Some(amount) = first_amount(line) {
                totals.subtotal = amount;
            }
        }

        if GRAND_TOTAL_LABEL.is_match(line) {
            if let Some(amount) = first_amount(line) {
                totals.grand = amount;
            }
        }

        if TAX_KEYWORD.is_match(line) {
            accumulate_tax(&mut totals, line);
        }

        totals.raw.extend(amounts_in(line));
    }

    if totals.grand.is_zero() {
        if let Some(last) = totals.raw.last() {
            debug!("No labelled grand total, using last amount {}", last);
            totals.grand = *last;
        }
    }

    if totals.subtotal.is_zero() && totals.raw.len() > 1 {
        let second_last = totals.raw[totals.raw.len() - 2];
        debug!("No labelled subtotal, using second-to-last amount {}", second_last);
        totals.subtotal = second_last;
    }

    totals
}

fn accumulate_tax(totals: &mut Totals, line: &str) {
    if let Some(caps) = TAX_BREAKDOWN.captures(line) {
        let label = caps[1].to_uppercase();
        let amount = parse_amount(&caps[3]);
        trace!("Tax {} at {}%: {}", label, &caps[2], amount);

        *totals.gst.entry(label).or_default() += amount;
        totals.tax += amount;
    } else if let Some(amount) = last_amount(line) {
        trace!("Unlabelled tax amount {}", amount);
        totals.tax += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_labelled_totals() {
        let totals = detect_totals(&lines(&[
            "Bread ₹40.00",
            "Subtotal ₹1,000.00",
            "CGST 9% ₹90.00",
            "SGST 9% ₹90.00",
            "Grand Total ₹1,180.00",
        ]));

        assert_eq!(totals.subtotal, dec("1000"));
        assert_eq!(totals.grand, dec("1180"));
        assert_eq!(totals.tax, dec("180"));
        assert_eq!(totals.gst.get("CGST"), Some(&dec("90")));
        assert_eq!(totals.gst.get("SGST"), Some(&dec("90")));
        assert_eq!(
            totals.raw,
            vec![dec("40"), dec("1000"), dec("90"), dec("90"), dec("1180")]
        );
    }

    #[test]
    fn test_unlabelled_fallback() {
        let totals = detect_totals(&lines(&["Tea ₹100.00", "Snacks ₹500.00"]));

        assert_eq!(totals.grand, dec("500.00"));
        assert_eq!(totals.subtotal, dec("100.00"));
        assert_eq!(totals.tax, Decimal::ZERO);
    }

    #[test]
    fn test_single_amount_sets_only_grand() {
        let totals = detect_totals(&lines(&["Coffee ₹120"]));
        assert_eq!(totals.grand, dec("120"));
        assert_eq!(totals.subtotal, Decimal::ZERO);
    }

    #[test]
    fn test_total_line_prefix() {
        let totals = detect_totals(&lines(&["TOTAL: ₹250.00 paid ₹300.00"]));
        assert_eq!(totals.grand, dec("250"));
    }

    #[test]
    fn test_last_labelled_subtotal_wins() {
        let totals = detect_totals(&lines(&[
            "subtotal ₹10.00",
            "subtotal ₹20.00",
            "total amount ₹25.00",
        ]));
        assert_eq!(totals.subtotal, dec("20"));
        assert_eq!(totals.grand, dec("25"));
    }

    #[test]
    fn test_tax_without_rate_goes_to_tax_only() {
        let totals = detect_totals(&lines(&["Tax ₹12.00 ₹15.00", "GST ₹45.00"]));

        // "Tax" is not a breakdown label; "GST ₹45.00" has no rate figure
        assert_eq!(totals.tax, dec("60"));
        assert!(totals.gst.is_empty());
    }

    #[test]
    fn test_vat_label_is_upper_cased() {
        let totals = detect_totals(&lines(&["vat 5% ₹7.50", "Vat 5% ₹2.50"]));
        assert_eq!(totals.gst.get("VAT"), Some(&dec("10.00")));
        assert_eq!(totals.tax, dec("10.00"));
    }

    #[test]
    fn test_empty_lines() {
        assert_eq!(detect_totals(&[]), Totals::default());
    }

    #[test]
    fn test_non_ascii_digits_ignored() {
        let totals = detect_totals(&lines(&["Tea ₹४५.००", "Coffee ₹20.00"]));

        assert_eq!(totals.raw, vec![dec("20.00")]);
        assert_eq!(totals.grand, dec("20.00"));
        assert_eq!(totals.subtotal, Decimal::ZERO);
    }
}
