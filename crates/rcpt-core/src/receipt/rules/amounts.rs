//! Amount extraction and price normalization.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::patterns::{AMOUNT_IN_TEXT, CURRENCY_SYMBOLS, PRICE_SHAPE};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::receipt::Money;

/// Amount field extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Money>;

    /// The first amount carrying a currency symbol, else the first amount.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let all = self.extract_all(text);
        let marked = all.iter().position(|m| m.confidence >= 0.9);
        let index = marked.unwrap_or(0);
        all.into_iter().nth(index)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AMOUNT_IN_TEXT
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let confidence = if caps.get(1).is_some() { 0.9 } else { 0.6 };
                Some(
                    ExtractionMatch::new(normalize_price(&caps[2]), confidence, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                )
            })
            .collect()
    }
}

/// Parse a price token into canonical [`Money`].
///
/// Strips surrounding whitespace, one leading currency symbol and grouping
/// commas. Anything that still does not parse as a non-negative decimal
/// yields zero.
pub fn normalize_price(token: &str) -> Money {
    let cleaned = token.trim();
    let cleaned = cleaned
        .strip_prefix(CURRENCY_SYMBOLS)
        .unwrap_or(cleaned)
        .trim_start()
        .replace(',', "");

    Decimal::from_str(&cleaned)
        .map(Money::new)
        .unwrap_or(Money::ZERO)
}

/// True if the whole token, after trimming, is shaped like a price.
pub fn looks_like_price(token: &str) -> bool {
    PRICE_SHAPE.is_match(token.trim())
}

/// Pre-filter for the amount rule: the text is a bare price, or carries a
/// currency symbol or an amount somewhere in it.
pub fn contains_amount(text: &str) -> bool {
    looks_like_price(text) || text.contains(CURRENCY_SYMBOLS) || AMOUNT_IN_TEXT.is_match(text)
}
