//! Reading-order reconstruction from fragment geometry.

use std::cmp::Ordering;

use tracing::debug;

use super::{Fragment, Position};

/// Compare two positions in reading order (top-to-bottom, left-to-right).
///
/// With `row_tolerance == 0.0` this is plain `(top, left)` ordering. With a
/// positive tolerance, `top` is first bucketed into bands of that height so
/// that slightly skewed rows still read left-to-right; bucketing keeps the
/// comparison transitive.
pub fn compare_reading_order(a: &Position, b: &Position, row_tolerance: f64) -> Ordering {
    if row_tolerance > 0.0 {
        let row_a = (a.top / row_tolerance).floor();
        let row_b = (b.top / row_tolerance).floor();
        row_a
            .total_cmp(&row_b)
            .then_with(|| a.left.total_cmp(&b.left))
            .then_with(|| a.top.total_cmp(&b.top))
    } else {
        a.top
            .total_cmp(&b.top)
            .then_with(|| a.left.total_cmp(&b.left))
    }
}

/// Fragments borrowed from a document, sorted into reading order.
#[derive(Debug, Clone)]
pub struct OrderedFragments<'a> {
    fragments: Vec<&'a Fragment>,
}

impl<'a> OrderedFragments<'a> {
    /// Order by exact `(top, left)`.
    pub fn new(fragments: &'a [Fragment]) -> Self {
        Self::with_tolerance(fragments, 0.0)
    }

    /// Order with a row tolerance band; see [`compare_reading_order`].
    pub fn with_tolerance(fragments: &'a [Fragment], row_tolerance: f64) -> Self {
        let mut ordered: Vec<&'a Fragment> = fragments.iter().collect();
        // Stable: fragments at identical coordinates keep provider order.
        ordered.sort_by(|a, b| compare_reading_order(&a.position, &b.position, row_tolerance));

        debug!(
            "Ordered {} fragments (row tolerance {})",
            ordered.len(),
            row_tolerance
        );

        Self { fragments: ordered }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Fragment> + '_ {
        self.fragments.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'a Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(ordered: &OrderedFragments<'a>) -> Vec<&'a str> {
        ordered.iter().map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn test_top_to_bottom_then_left_to_right() {
        let fragments = vec![
            Fragment::new("Total", 90.0, 0.60, 0.1),
            Fragment::new("$4.99", 90.0, 0.30, 0.7),
            Fragment::new("STORE", 90.0, 0.05, 0.3),
            Fragment::new("Milk", 90.0, 0.30, 0.1),
        ];

        let ordered = OrderedFragments::new(&fragments);
        assert_eq!(texts(&ordered), vec!["STORE", "Milk", "$4.99", "Total"]);
    }

    #[test]
    fn test_near_equal_tops_stay_in_numeric_order() {
        let fragments = vec![
            Fragment::new("Milk", 90.0, 0.301, 0.1),
            Fragment::new("$4.99", 90.0, 0.300, 0.7),
        ];

        let ordered = OrderedFragments::new(&fragments);
        assert_eq!(texts(&ordered), vec!["$4.99", "Milk"]);
    }

    #[test]
    fn test_row_tolerance_groups_skewed_rows() {
        let fragments = vec![
            Fragment::new("$4.99", 90.0, 0.302, 0.7),
            Fragment::new("Milk", 90.0, 0.305, 0.1),
            Fragment::new("Bread", 90.0, 0.352, 0.1),
        ];

        let ordered = OrderedFragments::with_tolerance(&fragments, 0.01);
        assert_eq!(texts(&ordered), vec!["Milk", "$4.99", "Bread"]);
    }

    #[test]
    fn test_ordering_is_deterministic() {
        let fragments = vec![
            Fragment::new("c", 90.0, 0.5, 0.5),
            Fragment::new("a", 90.0, 0.1, 0.9),
            Fragment::new("b", 90.0, 0.1, 0.2),
            Fragment::new("d", 90.0, 0.9, 0.0),
        ];
        let mut reversed = fragments.clone();
        reversed.reverse();

        let first = OrderedFragments::new(&fragments);
        let second = OrderedFragments::new(&fragments);
        let from_reversed = OrderedFragments::new(&reversed);

        assert_eq!(first.as_slice(), second.as_slice());
        assert_eq!(texts(&first), texts(&from_reversed));
        assert_eq!(texts(&first), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_compare_is_equal_only_for_identical_coordinates() {
        let a = Position::at(0.2, 0.3);
        let b = Position::at(0.2, 0.3);
        let c = Position::at(0.2, 0.4);

        assert_eq!(compare_reading_order(&a, &b, 0.0), Ordering::Equal);
        assert_eq!(compare_reading_order(&a, &c, 0.0), Ordering::Less);
        assert_eq!(compare_reading_order(&c, &a, 0.0), Ordering::Greater);
    }
}
