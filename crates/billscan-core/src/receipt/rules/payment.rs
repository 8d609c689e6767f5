//! Payment mode, payment reference and invoice number detection.

use lazy_static::lazy_static;

use super::patterns::{
    INVOICE_NUMBER, PAYMENT_MODE_LABEL, PAYMENT_TOKEN, REFERENCE_LABEL, UPI_HANDLE,
};
use super::{first_match, PatternStrategy};

lazy_static! {
    /// Labelled mode first, then any bare payment keyword.
    pub static ref PAYMENT_MODE_STRATEGIES: [PatternStrategy; 2] = [
        PatternStrategy::new("payment-mode-label", &PAYMENT_MODE_LABEL, 2),
        PatternStrategy::new("payment-token", &PAYMENT_TOKEN, 0),
    ];

    /// Labelled reference first, then anything shaped like a UPI handle.
    pub static ref REFERENCE_STRATEGIES: [PatternStrategy; 2] = [
        PatternStrategy::new("reference-label", &REFERENCE_LABEL, 1),
        PatternStrategy::new("upi-handle", &UPI_HANDLE, 0),
    ];

    pub static ref INVOICE_NUMBER_STRATEGIES: [PatternStrategy; 1] = [
        PatternStrategy::new("invoice-label", &INVOICE_NUMBER, 1),
    ];
}

/// Payment mode as printed, empty when none is found.
pub fn detect_payment_mode(text: &str) -> String {
    first_match(PAYMENT_MODE_STRATEGIES.iter(), text).unwrap_or_default()
}

/// Payment reference or UPI handle, empty when none is found.
pub fn detect_reference(text: &str) -> String {
    first_match(REFERENCE_STRATEGIES.iter(), text).unwrap_or_default()
}

/// Invoice, bill or receipt number, empty when none is found.
pub fn detect_invoice_number(text: &str) -> String {
    first_match(INVOICE_NUMBER_STRATEGIES.iter(), text).unwrap_or_default()
}
