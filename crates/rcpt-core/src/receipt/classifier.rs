//! Single-pass field classifier over fragments in reading order.

use tracing::trace;

use crate::models::config::ClassifierConfig;
use crate::models::receipt::Money;
use crate::ocr::{Fragment, OrderedFragments};

use super::rules::patterns::CURRENCY_SYMBOLS;
use super::rules::{
    AmountExtractor, ExtractionMatch, FieldExtractor, contains_amount, extract_date,
    normalize_item_name, normalize_vendor_name,
};

/// A line item as discovered; quantity is resolved by the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCandidate {
    pub name: String,
    /// `None` when the receipt did not state a quantity.
    pub qty: Option<u32>,
    pub price: Money,
}

/// What a single fragment was classified as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Vendor(String),
    /// The matched date substring, not the whole fragment.
    Date(String),
    Subtotal(Money),
    Tax(Money),
    Total(Money),
    Item(ItemCandidate),
    /// Price-shaped but its residual name was too short to be an item.
    SuppressedItem,
    Skipped,
}

/// Accumulated classifier output, threaded through the pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifierState {
    pub vendor: Option<String>,
    pub date: Option<String>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub items: Vec<ItemCandidate>,
}

impl ClassifierState {
    /// Fold one classification into the state.
    ///
    /// Vendor and date are first-match. Tax and total are first plausible
    /// (non-zero) match. Subtotal is last-match.
    pub fn apply(mut self, classification: Classification) -> Self {
        match classification {
            Classification::Vendor(vendor) => {
                self.vendor.get_or_insert(vendor);
            }
            Classification::Date(date) => {
                self.date.get_or_insert(date);
            }
            Classification::Subtotal(amount) => self.subtotal = amount,
            Classification::Tax(amount) => {
                if self.tax.is_zero() {
                    self.tax = amount;
                }
            }
            Classification::Total(amount) => {
                if self.total.is_zero() {
                    self.total = amount;
                }
            }
            Classification::Item(item) => self.items.push(item),
            Classification::SuppressedItem | Classification::Skipped => {}
        }
        self
    }
}

/// Heuristic classifier assigning each fragment to at most one field.
pub struct FieldClassifier {
    config: ClassifierConfig,
    amounts: AmountExtractor,
}

impl FieldClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            amounts: AmountExtractor::new(),
        }
    }

    /// Run the whole pass.
    pub fn classify_all(&self, ordered: &OrderedFragments<'_>) -> ClassifierState {
        ordered
            .iter()
            .enumerate()
            .fold(ClassifierState::default(), |state, (index, fragment)| {
                let classification = self.classify(index, fragment, &state);
                trace!("Fragment {} {:?} -> {:?}", index, fragment.text, classification);
                state.apply(classification)
            })
    }

    /// Classify the fragment at `index` given what has been found so far.
    /// Rules are tried in order: vendor, date, amount.
    pub fn classify(
        &self,
        index: usize,
        fragment: &Fragment,
        state: &ClassifierState,
    ) -> Classification {
        let text = fragment.text.as_str();

        if state.vendor.is_none()
            && index < self.config.vendor_scan_limit
            && fragment.confidence > self.config.vendor_min_confidence
        {
            let vendor = normalize_vendor_name(text);
            if vendor.chars().count() >= self.config.vendor_min_length {
                return Classification::Vendor(vendor);
            }
        }

        if state.date.is_none() {
            if let Some(date) = extract_date(text) {
                return Classification::Date(date);
            }
        }

        if contains_amount(text) {
            return self.classify_amount(text);
        }

        Classification::Skipped
    }

    fn classify_amount(&self, text: &str) -> Classification {
        let found = self.amounts.extract(text);
        let amount = found.as_ref().map(|m| m.value).unwrap_or(Money::ZERO);
        let lower = text.to_lowercase();

        if lower.contains("subtotal") {
            Classification::Subtotal(amount)
        } else if lower.contains("tax") {
            Classification::Tax(amount)
        } else if lower.contains("total") {
            Classification::Total(amount)
        } else if amount.is_positive() {
            let name = found
                .as_ref()
                .map(|m| item_name(text, m))
                .unwrap_or_default();
            if name.chars().count() < self.config.item_min_name_length {
                Classification::SuppressedItem
            } else {
                Classification::Item(ItemCandidate {
                    name,
                    qty: None,
                    price: amount,
                })
            }
        } else {
            Classification::Skipped
        }
    }
}

impl Default for FieldClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

/// The text with the matched price and any currency symbols removed.
fn item_name(text: &str, price: &ExtractionMatch<Money>) -> String {
    let residual: String = price
        .remainder(text)
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c))
        .collect();
    normalize_item_name(&residual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::new(Decimal::from_str(s).unwrap())
    }

    fn classify_one(text: &str) -> Classification {
        let classifier = FieldClassifier::default();
        // Index past the vendor window, low confidence.
        classifier.classify(10, &Fragment::new(text, 50.0, 0.5, 0.1), &ClassifierState::default())
    }

    #[test]
    fn test_keyword_priority() {
        assert_eq!(classify_one("Subtotal $4.99"), Classification::Subtotal(money("4.99")));
        assert_eq!(classify_one("SALES TAX $0.40"), Classification::Tax(money("0.40")));
        assert_eq!(classify_one("Total $5.39"), Classification::Total(money("5.39")));
        assert_eq!(classify_one("Total incl. tax $5.39"), Classification::Tax(money("5.39")));
        assert_eq!(classify_one("SUBTOTAL (tax excl) $4.99"), Classification::Subtotal(money("4.99")));
    }

    #[test]
    fn test_item_extraction() {
        assert_eq!(
            classify_one("*Milk* $4.99"),
            Classification::Item(ItemCandidate {
                name: "Milk".to_string(),
                qty: None,
                price: money("4.99"),
            })
        );
        assert_eq!(
            classify_one("Eggs 12ct $3.49"),
            Classification::Item(ItemCandidate {
                name: "Eggs 12ct".to_string(),
                qty: None,
                price: money("3.49"),
            })
        );
    }

    #[test]
    fn test_cents_only_item_prices() {
        assert_eq!(
            classify_one("Gum $.99"),
            Classification::Item(ItemCandidate {
                name: "Gum".to_string(),
                qty: None,
                price: money("0.99"),
            })
        );
        assert_eq!(
            classify_one("Mints .75"),
            Classification::Item(ItemCandidate {
                name: "Mints".to_string(),
                qty: None,
                price: money("0.75"),
            })
        );
        assert_eq!(classify_one("Tax .08"), Classification::Tax(money("0.08")));
    }

    #[test]
    fn test_item_suppression() {
        assert_eq!(classify_one("$ .99"), Classification::SuppressedItem);
        assert_eq!(classify_one("$4.99"), Classification::SuppressedItem);
        assert_eq!(classify_one("A $1.00"), Classification::SuppressedItem);
    }

    #[test]
    fn test_zero_amount_is_not_an_item() {
        assert_eq!(classify_one("Change $0.00"), Classification::Skipped);
        assert_eq!(classify_one("THANK YOU"), Classification::Skipped);
    }

    #[test]
    fn test_vendor_gate() {
        let classifier = FieldClassifier::default();
        let state = ClassifierState::default();

        let fragment = Fragment::new("  BIG MART  ", 97.0, 0.01, 0.1);
        assert_eq!(
            classifier.classify(0, &fragment, &state),
            Classification::Vendor("BIG MART".to_string())
        );
        assert_eq!(classifier.classify(4, &fragment, &state), Classification::Skipped);

        let low_confidence = Fragment::new("BIG MART", 90.0, 0.01, 0.1);
        assert_eq!(classifier.classify(0, &low_confidence, &state), Classification::Skipped);

        let short = Fragment::new("ABC", 99.0, 0.01, 0.1);
        assert_eq!(classifier.classify(0, &short, &state), Classification::Skipped);
    }

    #[test]
    fn test_rules_are_exclusive_per_fragment() {
        let classifier = FieldClassifier::default();
        let state = ClassifierState::default();

        // Vendor claims the fragment before the amount rule sees it.
        let fragment = Fragment::new("Store 42 $1.00", 99.0, 0.0, 0.0);
        assert_eq!(
            classifier.classify(0, &fragment, &state),
            Classification::Vendor("Store 42 $1.00".to_string())
        );

        // Date claims the fragment before the amount rule sees it.
        let fragment = Fragment::new("03/15/2024 $1.00", 50.0, 0.1, 0.0);
        assert_eq!(
            classifier.classify(5, &fragment, &state),
            Classification::Date("03/15/2024".to_string())
        );
    }

    #[test]
    fn test_state_field_policies() {
        let state = ClassifierState::default()
            .apply(Classification::Vendor("FIRST".to_string()))
            .apply(Classification::Vendor("SECOND".to_string()))
            .apply(Classification::Subtotal(money("1.00")))
            .apply(Classification::Subtotal(money("2.00")))
            .apply(Classification::Tax(Money::ZERO))
            .apply(Classification::Tax(money("0.20")))
            .apply(Classification::Tax(money("0.30")))
            .apply(Classification::Total(money("2.20")))
            .apply(Classification::Total(money("9.99")));

        assert_eq!(state.vendor.as_deref(), Some("FIRST"));
        assert_eq!(state.subtotal, money("2.00"));
        assert_eq!(state.tax, money("0.20"));
        assert_eq!(state.total, money("2.20"));
    }

    #[test]
    fn test_classify_all_preserves_item_order() {
        let fragments = vec![
            Fragment::new("Bread $2.50", 95.0, 0.40, 0.1),
            Fragment::new("Milk $4.99", 95.0, 0.30, 0.1),
            Fragment::new("Eggs $3.49", 95.0, 0.35, 0.1),
        ];
        let ordered = OrderedFragments::new(&fragments);

        let classifier = FieldClassifier::new(ClassifierConfig {
            vendor_scan_limit: 0,
            ..ClassifierConfig::default()
        });
        let state = classifier.classify_all(&ordered);

        let names: Vec<&str> = state.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Eggs", "Bread"]);
    }
}
