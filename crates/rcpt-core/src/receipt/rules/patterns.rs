//! Common regex patterns for receipt field extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Currency symbols recognized in front of amounts.
pub const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£'];

lazy_static! {
    // A token that is nothing but an amount: $1.99, 1.99, $1,234.56, $.99
    pub static ref PRICE_SHAPE: Regex = Regex::new(
        r"^[$€£]?\s*(?:\d[\d,]*\.?\d*|\.\d+)$"
    ).unwrap();

    // An amount anywhere in a line, optionally preceded by a currency symbol.
    // Cents-only amounts like .99 have no leading digit.
    pub static ref AMOUNT_IN_TEXT: Regex = Regex::new(
        r"(?:([$€£])\s*)?(\d[\d,]*(?:\.\d+)?|\.\d+)"
    ).unwrap();

    // Date shapes, in priority order
    pub static ref DATE_MDY_SLASH: Regex = Regex::new(
        r"\b\d{1,2}/\d{1,2}/\d{2,4}\b"
    ).unwrap();

    pub static ref DATE_MDY_DASH: Regex = Regex::new(
        r"\b\d{1,2}-\d{1,2}-\d{2,4}\b"
    ).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(
        r"\b\d{4}-\d{2}-\d{2}\b"
    ).unwrap();

    pub static ref DATE_MONTH_DAY_YEAR: Regex = Regex::new(
        r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4}\b"
    ).unwrap();

    pub static ref DATE_DAY_MONTH_YEAR: Regex = Regex::new(
        r"(?i)\b\d{1,2}\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{4}\b"
    ).unwrap();
}
