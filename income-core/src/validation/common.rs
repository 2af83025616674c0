//! Shared helpers for form validation.

use std::sync::LazyLock;

use regex::Regex;

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digit pattern is valid"));

/// Parses a user-entered whole number such as a monthly income.
///
/// Whitespace anywhere in the input is ignored, so `"2 500"` is accepted.
/// Signs, decimal separators and empty input are rejected, as are values
/// that do not fit in an `i32`.
///
/// # Examples
///
/// ```
/// use income_core::validation::common::parse_int;
///
/// assert_eq!(parse_int("2500"), Some(2500));
/// assert_eq!(parse_int(" 2 500 "), Some(2500));
/// assert_eq!(parse_int("2500.50"), None);
/// assert_eq!(parse_int(""), None);
/// ```
pub fn parse_int(s: &str) -> Option<i32> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if !DIGITS.is_match(&compact) {
        return None;
    }
    compact.parse().ok()
}
