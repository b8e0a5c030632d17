//! # Number Parsing
//!
//! Turns free-form numeric text typed by a person into a number.
//!
//! ## Accepted Input
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "1.600,50"   → 1600.50   comma is the later separator → decimal       │
//! │  "1,600.50"   → 1600.50   dot is the later separator   → decimal       │
//! │  "$ 1.600"    → 1600.0    dots in thousand groups      → grouping      │
//! │  "12,5"       → 12.5      only a comma                 → decimal       │
//! │  "ARS 99.90"  → 99.9      currency markers stripped                    │
//! │  "" / "abc"   → default   never an error                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Leniency Contract
//! Malformed input resolves to the caller-supplied default instead of an
//! error, so a bad keystroke in a price field never blocks the workflow.

/// Currency markers removed before parsing (matched case-insensitively).
const CURRENCY_MARKERS: &[&str] = &["$", "ars", "usd"];

/// Parses a decimal amount, returning `default` when the text is unusable.
///
/// ## Rules
/// 1. Currency markers and whitespace are removed.
/// 2. Everything except digits, `.`, `,` and `-` is dropped.
/// 3. Both separators present: the one occurring last is the decimal point,
///    the other one is digit grouping.
/// 4. Only commas: the comma is the decimal point.
/// 5. Only dots: kept as a decimal point, unless the text is made purely of
///    thousand groups (`1.600`, `12.500.000`), in which case the dots are
///    grouping.
///
/// ## Example
/// ```rust
/// use stock_core::parsing::parse_decimal;
///
/// assert_eq!(parse_decimal("1.600,50", 0.0), 1600.50);
/// assert_eq!(parse_decimal("1,600.50", 0.0), 1600.50);
/// assert_eq!(parse_decimal("$ 1.600", 0.0), 1600.0);
/// assert_eq!(parse_decimal("", 7.5), 7.5);
/// ```
pub fn parse_decimal(text: &str, default: f64) -> f64 {
    canonicalize(text)
        .and_then(|canonical| canonical.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(default)
}

/// Parses an integer count (stock, quantity), returning `default` when the
/// text is unusable. Fractions are truncated toward zero.
///
/// ## Example
/// ```rust
/// use stock_core::parsing::parse_quantity;
///
/// assert_eq!(parse_quantity("12", 0), 12);
/// assert_eq!(parse_quantity("12.0", 0), 12);
/// assert_eq!(parse_quantity("1.200", 0), 1200);
/// assert_eq!(parse_quantity("many", 1), 1);
/// ```
pub fn parse_quantity(text: &str, default: i64) -> i64 {
    let value = parse_decimal(text, f64::NAN);
    if value.is_nan() || value.abs() >= i64::MAX as f64 {
        return default;
    }
    value.trunc() as i64
}

/// Reduces `text` to a string `f64::from_str` understands, or `None` when
/// nothing numeric is left.
fn canonicalize(text: &str) -> Option<String> {
    let mut stripped = text.to_ascii_lowercase();
    for marker in CURRENCY_MARKERS {
        stripped = stripped.replace(marker, "");
    }

    let kept: String = stripped
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();

    if kept.is_empty() {
        return None;
    }

    let last_dot = kept.rfind('.');
    let last_comma = kept.rfind(',');

    let canonical = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) if dot > comma => kept.replace(',', ""),
        (Some(_), Some(_)) => kept.replace('.', "").replace(',', "."),
        (None, Some(_)) => kept.replace(',', "."),
        (Some(_), None) if is_thousand_grouped(&kept, '.') => kept.replace('.', ""),
        _ => kept,
    };

    Some(canonical)
}

/// True for `1.600`, `-12.500.000`: a leading group of 1-3 digits that does
/// not start with zero, followed only by `.ddd` groups.
fn is_thousand_grouped(text: &str, separator: char) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let mut groups = unsigned.split(separator);

    let Some(head) = groups.next() else {
        return false;
    };
    if head.is_empty() || head.len() > 3 || head.starts_with('0') {
        return false;
    }
    if !head.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let mut tail_count = 0;
    for group in groups {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        tail_count += 1;
    }
    tail_count > 0
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_decimal_convention() {
        assert_eq!(parse_decimal("1.600,50", 0.0), 1600.50);
        assert_eq!(parse_decimal("12,5", 0.0), 12.5);
        assert_eq!(parse_decimal("1.234.567,89", 0.0), 1234567.89);
    }

    #[test]
    fn test_dot_decimal_convention() {
        assert_eq!(parse_decimal("1,600.50", 0.0), 1600.50);
        assert_eq!(parse_decimal("1,234,567.89", 0.0), 1234567.89);
        assert_eq!(parse_decimal("10.99", 0.0), 10.99);
    }

    #[test]
    fn test_currency_markers() {
        assert_eq!(parse_decimal("$ 1.600", 0.0), 1600.0);
        assert_eq!(parse_decimal("ARS 99,90", 0.0), 99.9);
        assert_eq!(parse_decimal("usd 5", 0.0), 5.0);
        assert_eq!(parse_decimal("  $1,600.50 USD ", 0.0), 1600.50);
    }

    #[test]
    fn test_dot_grouping_only_for_full_thousand_groups() {
        assert_eq!(parse_decimal("12.500.000", 0.0), 12_500_000.0);
        assert_eq!(parse_decimal("0.125", 0.0), 0.125);
        assert_eq!(parse_decimal("1.5", 0.0), 1.5);
        assert_eq!(parse_decimal("1600.50", 0.0), 1600.50);
    }

    #[test]
    fn test_three_digit_dot_tail_reads_as_thousands() {
        // A dot followed by exactly three digits is a grouping separator,
        // so these are not read as decimals.
        assert_eq!(parse_decimal("2.500", 0.0), 2500.0);
        assert_eq!(parse_decimal("1.000", 0.0), 1000.0);
        assert_eq!(parse_decimal("$ 1.600", 0.0), 1600.0);

        // Two-decimal renderings of the same values stay stable.
        assert_eq!(parse_decimal("2500.00", 0.0), 2500.0);
        assert_eq!(parse_decimal(&format!("{:.2}", 2.5), 0.0), 2.5);

        // A leading zero group is never thousands.
        assert_eq!(parse_decimal("0.500", 0.0), 0.5);
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(parse_decimal("-3,5", 0.0), -3.5);
        assert_eq!(parse_decimal("-1.600", 0.0), -1600.0);
    }

    #[test]
    fn test_falls_back_to_default() {
        assert_eq!(parse_decimal("", 0.0), 0.0);
        assert_eq!(parse_decimal("   ", 2.5), 2.5);
        assert_eq!(parse_decimal("abc", 0.0), 0.0);
        assert_eq!(parse_decimal("$", 1.0), 1.0);
        assert_eq!(parse_decimal("1-2", 0.0), 0.0);
        assert_eq!(parse_decimal(".", 4.0), 4.0);
        assert_eq!(parse_decimal("1.2.3", 9.0), 9.0);
    }

    #[test]
    fn test_idempotent_on_canonical_strings() {
        for canonical in ["0", "10", "10.5", "1600.50", "0.99", "-4.25"] {
            let once = parse_decimal(canonical, -1.0);
            let twice = parse_decimal(&format!("{:.2}", once), -1.0);
            assert_eq!(once, twice, "input {canonical}");
            assert_eq!(once, canonical.parse::<f64>().unwrap());
        }
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("40", 0), 40);
        assert_eq!(parse_quantity("3,9", 0), 3);
        assert_eq!(parse_quantity("-2", 0), -2);
        assert_eq!(parse_quantity("", 5), 5);
        assert_eq!(parse_quantity("x", 0), 0);
    }
}
