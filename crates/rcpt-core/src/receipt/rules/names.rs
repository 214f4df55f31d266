//! Vendor and item name cleanup.

/// Receipt glyph marking discounted or taxable items.
const ITEM_MARKER: char = '*';

/// Trim surrounding whitespace. Casing is kept as scanned.
pub fn normalize_vendor_name(text: &str) -> String {
    text.trim().to_string()
}

/// Trim whitespace and a single leading and/or trailing `*` marker.
pub fn normalize_item_name(text: &str) -> String {
    let cleaned = text.trim();
    let cleaned = cleaned.strip_prefix(ITEM_MARKER).unwrap_or(cleaned);
    let cleaned = cleaned.strip_suffix(ITEM_MARKER).unwrap_or(cleaned);
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_name_keeps_casing() {
        assert_eq!(normalize_vendor_name("  Joe's CAFE \n"), "Joe's CAFE");
    }

    #[test]
    fn test_item_name_markers() {
        assert_eq!(normalize_item_name("*Milk*"), "Milk");
        assert_eq!(normalize_item_name(" * Eggs "), "Eggs");
        assert_eq!(normalize_item_name("**Bread**"), "*Bread*");
        assert_eq!(normalize_item_name("Olive Oil"), "Olive Oil");
    }
}
