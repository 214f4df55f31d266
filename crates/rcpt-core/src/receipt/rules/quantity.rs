//! Item quantity parsing.

/// Quantity assumed when none is stated.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Parse an explicitly stated quantity; `None` when the token is not a
/// positive integer.
pub fn parse_explicit_quantity(token: &str) -> Option<u32> {
    token
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|&n| n >= 1)
        .and_then(|n| u32::try_from(n).ok())
}

/// Parse a quantity, falling back to [`DEFAULT_QUANTITY`].
///
/// A stated `1` and a missing quantity are indistinguishable here; use
/// [`parse_explicit_quantity`] to keep them apart.
pub fn parse_quantity(token: &str) -> u32 {
    parse_explicit_quantity(token).unwrap_or(DEFAULT_QUANTITY)
}
