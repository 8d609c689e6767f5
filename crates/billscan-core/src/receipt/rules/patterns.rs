//! Common regex patterns for receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Line handling
    pub static ref LINE_BREAK: Regex = Regex::new(r"\r\n|\r|\n").unwrap();

    pub static ref MULTI_SPACE: Regex = Regex::new(r"\s{2,}").unwrap();

    // Digit classes are ASCII only; other scripts' digits are not amounts.

    // Currency amount: rupee sign, grouped digits, optional fraction
    pub static ref MONEY: Regex = Regex::new(
        r"₹\s?([0-9,]+(?:\.[0-9]{1,2})?)"
    ).unwrap();

    // Merchant heading
    pub static ref MERCHANT_EXCLUDE: Regex = Regex::new(
        r"(?i)GST|INVOICE|TAX|DATE|PHONE|MOB|ADDRESS"
    ).unwrap();

    pub static ref UPPER_ONLY: Regex = Regex::new(r"^[A-Z0-9 ]+$").unwrap();

    // Dates, highest priority first
    pub static ref DATE_DAY_MONTH_NAME: Regex = Regex::new(
        r"(?i)\b([0-3]?[0-9][-/\s](?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*[-/\s][0-9]{2,4})\b"
    ).unwrap();

    pub static ref DATE_NUMERIC_DMY: Regex = Regex::new(
        r"\b([0-3]?[0-9][/\-][0-1]?[0-9][/\-][0-9]{2,4})\b"
    ).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(
        r"\b([0-9]{4}[-/][0-9]{1,2}[-/][0-9]{1,2})\b"
    ).unwrap();

    pub static ref DATE_MONTH_YEAR: Regex = Regex::new(
        r"(?i)\b((?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+[0-9]{4})\b"
    ).unwrap();

    // Totals
    pub static ref SUBTOTAL_LABEL: Regex = Regex::new(r"(?i)\bsubtotal\b").unwrap();

    pub static ref GRAND_TOTAL_LABEL: Regex = Regex::new(
        r"(?i)grand\s*total|\btotal\s*amount\b|^total[:\s]"
    ).unwrap();

    pub static ref TAX_KEYWORD: Regex = Regex::new(
        r"(?i)\b(GST|CGST|SGST|VAT|TAX)\b"
    ).unwrap();

    // Label, rate figure (the % sign is optional), then the last amount on the line
    pub static ref TAX_BREAKDOWN: Regex = Regex::new(
        r"(?i)(CGST|SGST|GST|VAT)[^0-9%]*([0-9]{1,2})%?.*₹\s?([0-9,]+(?:\.[0-9]{1,2})?)"
    ).unwrap();

    // Line items
    pub static ref ITEM_COLUMNS: Regex = Regex::new(
        r"^(.+?)\s+([0-9]+)\s+([0-9,]+\.[0-9]{2})\s+([0-9,]+\.[0-9]{2})$"
    ).unwrap();

    pub static ref ITEM_STRUCTURAL: Regex = Regex::new(
        r"(?i)\b(total|subtotal|grand|gst|tax|balance|change|payment|invoice|receipt|thank you|visit again)\b"
    ).unwrap();

    pub static ref SMALL_INTEGER: Regex = Regex::new(r"\b[0-9]{1,2}\b").unwrap();

    pub static ref TWO_DIGIT_RUN: Regex = Regex::new(r"[0-9]{2,}").unwrap();

    pub static ref DECIMAL_NUMBER: Regex = Regex::new(r"[0-9][0-9,]*\.[0-9]+").unwrap();

    pub static ref GROUPED_NUMBER: Regex = Regex::new(
        r"\b[0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]+)?\b"
    ).unwrap();

    pub static ref ITEM_LAST_RESORT: Regex = Regex::new(
        r"(.+?)\s+₹\s?([0-9,]+(?:\.[0-9]{1,2})?)"
    ).unwrap();

    // Payment metadata
    pub static ref PAYMENT_MODE_LABEL: Regex = Regex::new(
        r"(?i)\b(Payment Mode|Mode of Payment)[:\s]*([A-Za-z0-9]+)"
    ).unwrap();

    pub static ref PAYMENT_TOKEN: Regex = Regex::new(
        r"(?i)\b(UPI|CARD|CASH|NETBANKING|PAYTM)\b"
    ).unwrap();

    pub static ref REFERENCE_LABEL: Regex = Regex::new(
        r"(?i)Ref(?:erence)?(?: ID| No|:)?\s*[:\-]?\s*([A-Za-z0-9@-]+)"
    ).unwrap();

    pub static ref UPI_HANDLE: Regex = Regex::new(
        r"(?i)\b[A-Z0-9]{6,}@[a-zA-Z]+"
    ).unwrap();

    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)\b(?:Invoice|Inv|Bill|Receipt)[\s:]*([A-Za-z0-9/\-]+)"
    ).unwrap();
}
