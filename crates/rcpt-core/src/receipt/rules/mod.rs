//! Rule-based value normalizers for receipt fields.
//!
//! Every rule works on the text of a single OCR fragment. None of them look
//! at geometry or neighbouring lines; that context belongs to the classifier.

pub mod amounts;
pub mod dates;
pub mod names;
pub mod patterns;
pub mod quantity;

pub use amounts::{AmountExtractor, contains_amount, looks_like_price, normalize_price};
pub use dates::{DateExtractor, DateShape, extract_date};
pub use names::{normalize_item_name, normalize_vendor_name};
pub use quantity::{DEFAULT_QUANTITY, parse_explicit_quantity, parse_quantity};

/// A rule that pulls one kind of receipt value out of a fragment's text.
///
/// Receipt lines are short and noisy, and a single line often carries more
/// than one candidate ("2 @ $1.50 = $3.00", "Tax (8%) $0.40"). `extract`
/// returns the occurrence the classifier should act on; `extract_all`
/// returns every occurrence in text order (or priority order, for dates).
pub trait FieldExtractor {
    type Output;

    fn extract(&self, text: &str) -> Option<Self::Output>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value found in a fragment, with the span it came from.
///
/// The span lets the classifier cut a price out of an item line and keep
/// the rest as the item name.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    pub value: T,
    /// 0.9 for currency-marked amounts and dates, 0.6 for bare numbers.
    pub confidence: f32,
    /// Byte span in the fragment text.
    pub position: Option<(usize, usize)>,
    /// The matched substring, verbatim.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// The fragment text with the matched span removed.
    pub fn remainder(&self, text: &str) -> String {
        match self.position {
            Some((start, end)) if end <= text.len() => {
                format!("{}{}", &text[..start], &text[end..])
            }
            _ => text.replace(self.source.as_str(), ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remainder_cuts_matched_span() {
        let m = ExtractionMatch::new(499u32, 0.9, "$4.99").with_position(5, 10);
        assert_eq!(m.remainder("Milk $4.99 ea"), "Milk  ea");
    }

    #[test]
    fn test_remainder_without_position_removes_source_text() {
        let m = ExtractionMatch::new(1u32, 0.6, "$1");
        assert_eq!(m.remainder("Pen $1"), "Pen ");
    }
}
