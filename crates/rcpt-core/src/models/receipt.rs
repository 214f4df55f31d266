//! Receipt data models shared by every reconstruction path.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative currency amount in two-decimal canonical form.
///
/// Serialized as a JSON number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    /// The zero amount, also used as the "not found" value.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Canonicalize a decimal: negative values collapse to zero, everything
    /// else is rounded half away from zero to two decimal places.
    pub fn new(amount: Decimal) -> Self {
        if amount.is_sign_negative() {
            return Self::ZERO;
        }
        let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(2);
        Self(amount)
    }

    /// Underlying decimal value.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// True for the zero amount, which callers treat as absent.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// True when the amount is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Lossy conversion for display or JSON consumers.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    /// Saturates at [`Decimal::MAX`].
    fn add(self, rhs: Money) -> Money {
        Money::new(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Money::new)
    }
}

/// A single line item on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Item name as printed, trimmed of receipt glyphs.
    pub name: String,

    /// Quantity, always at least 1.
    pub qty: u32,

    /// Line price.
    pub price: Money,
}

/// The normalized, structured receipt record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Vendor name, casing preserved.
    pub vendor: String,

    /// Date substring exactly as scanned; empty when none was found.
    pub date: String,

    /// Line items in reading order.
    pub items: Vec<Item>,

    pub subtotal: Money,

    pub tax: Money,

    pub total: Money,

    /// Free-text note describing which reconstruction path produced this.
    pub confidence_notes: String,

    /// Detected inconsistencies, in the order they were found.
    #[serde(default)]
    pub anomalies: Vec<String>,
}

/// Calendar formats tried by [`Receipt::parsed_date`]. Two-digit year
/// variants come first so that `%Y` never swallows a two-digit year.
const CALENDAR_FORMATS: &[&str] = &[
    "%m/%d/%y", "%m/%d/%Y", "%m-%d-%y", "%m-%d-%Y", "%Y-%m-%d", "%b %d, %Y", "%b %d %Y",
    "%d %b %Y",
];

impl Receipt {
    /// Create an empty receipt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all item prices.
    pub fn items_total(&self) -> Money {
        self.items.iter().map(|i| i.price).sum()
    }

    /// Interpret the scanned date as a calendar date, if any supported
    /// format accepts it. Never modifies `date`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let date = self.date.split_whitespace().collect::<Vec<_>>().join(" ");
        if date.is_empty() {
            return None;
        }
        CALENDAR_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&date, fmt).ok())
    }

    /// Check arithmetic consistency and return any issues found.
    ///
    /// `tolerance` bounds the accepted absolute difference between amounts.
    pub fn validate(&self, tolerance: Decimal) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.subtotal.is_zero() && !self.total.is_zero() {
            let expected = self.subtotal + self.tax;
            if (expected.amount() - self.total.amount()).abs() > tolerance {
                issues.push(format!(
                    "Subtotal plus tax ({}) differs from total ({})",
                    expected, self.total
                ));
            }
        }

        if !self.items.is_empty() && !self.subtotal.is_zero() {
            let items_total = self.items_total();
            if (items_total.amount() - self.subtotal.amount()).abs() > tolerance {
                issues.push(format!(
                    "Item prices ({}) differ from subtotal ({})",
                    items_total, self.subtotal
                ));
            }
        }

        if !self.date.is_empty() && self.parsed_date().is_none() {
            issues.push(format!("Date '{}' is not a valid calendar date", self.date));
        }

        if self.total.is_zero() {
            issues.push("No total found".to_string());
        }

        issues
    }
}
