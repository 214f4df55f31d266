//! Date extraction for receipts.
//!
//! Dates are returned exactly as scanned. Shape matching is normalization,
//! not validation: `13/45/2024` is still an `M/D/Y` date here. Calendar
//! interpretation lives in [`crate::models::receipt::Receipt::parsed_date`].

use regex::Regex;

use super::patterns::{
    DATE_DAY_MONTH_YEAR, DATE_ISO, DATE_MDY_DASH, DATE_MDY_SLASH, DATE_MONTH_DAY_YEAR,
};
use super::{ExtractionMatch, FieldExtractor};

/// The date shapes recognized on receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateShape {
    /// `03/15/2024`, `3/5/24`
    MonthDayYearSlash,
    /// `03-15-2024`
    MonthDayYearDash,
    /// `2024-03-15`
    Iso,
    /// `Mar 15, 2024`
    MonthNameDayYear,
    /// `15 Mar 2024`
    DayMonthNameYear,
}

impl DateShape {
    /// All shapes, highest priority first.
    pub const PRIORITY: [DateShape; 5] = [
        DateShape::MonthDayYearSlash,
        DateShape::MonthDayYearDash,
        DateShape::Iso,
        DateShape::MonthNameDayYear,
        DateShape::DayMonthNameYear,
    ];

    fn pattern(&self) -> &'static Regex {
        match self {
            DateShape::MonthDayYearSlash => &*DATE_MDY_SLASH,
            DateShape::MonthDayYearDash => &*DATE_MDY_DASH,
            DateShape::Iso => &*DATE_ISO,
            DateShape::MonthNameDayYear => &*DATE_MONTH_DAY_YEAR,
            DateShape::DayMonthNameYear => &*DATE_DAY_MONTH_YEAR,
        }
    }
}

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Like [`FieldExtractor::extract`], also reporting which shape matched.
    pub fn extract_with_shape(&self, text: &str) -> Option<(DateShape, ExtractionMatch<String>)> {
        DateShape::PRIORITY.iter().find_map(|shape| {
            shape.pattern().find(text).map(|m| {
                (
                    *shape,
                    ExtractionMatch::new(m.as_str().to_string(), 0.9, m.as_str())
                        .with_position(m.start(), m.end()),
                )
            })
        })
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    /// The first match of the highest-priority shape that matches at all,
    /// regardless of where lower-priority matches sit in the text.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_with_shape(text).map(|(_, m)| m)
    }

    /// Every match, grouped by shape priority.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DateShape::PRIORITY
            .iter()
            .flat_map(|shape| shape.pattern().find_iter(text))
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), 0.9, m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Find the first date substring in `text`, by shape priority.
pub fn extract_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_shape() {
        assert_eq!(extract_date("Date: 03/15/2024"), Some("03/15/2024".to_string()));
        assert_eq!(extract_date("3/5/24 14:02"), Some("3/5/24".to_string()));
        assert_eq!(extract_date("03-15-2024"), Some("03-15-2024".to_string()));
        assert_eq!(extract_date("2024-03-15"), Some("2024-03-15".to_string()));
        assert_eq!(extract_date("Jan 15, 2024"), Some("Jan 15, 2024".to_string()));
        assert_eq!(extract_date("15 Jan 2024"), Some("15 Jan 2024".to_string()));
        assert_eq!(extract_date("THANK YOU"), None);
    }

    #[test]
    fn test_priority_beats_position() {
        let text = "2024-03-15 ref 03/15/2024";
        assert_eq!(extract_date(text), Some("03/15/2024".to_string()));
    }

    #[test]
    fn test_no_calendar_validation() {
        assert_eq!(extract_date("13/45/2024"), Some("13/45/2024".to_string()));
    }

    #[test]
    fn test_iso_not_mistaken_for_dashed_mdy() {
        let extractor = DateExtractor::new();
        let (shape, m) = extractor.extract_with_shape("Printed 2024-03-15").unwrap();
        assert_eq!(shape, DateShape::Iso);
        assert_eq!(m.position, Some((8, 18)));
    }

    #[test]
    fn test_extract_all_in_priority_order() {
        let extractor = DateExtractor::new();
        let all = extractor.extract_all("Mar 1, 2024 then 02/01/2024");
        let values: Vec<&str> = all.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["02/01/2024", "Mar 1, 2024"]);
    }
}
