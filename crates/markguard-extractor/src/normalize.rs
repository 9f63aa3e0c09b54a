//! Whitespace normalization and suffix cleanup for extracted values

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every whitespace run (newlines included) to one space and trim
///
/// # Examples
///
/// ```
/// use markguard_extractor::normalize;
///
/// assert_eq!(normalize("  Shield\n  Guard\tInc. "), "Shield Guard Inc.");
/// ```
pub fn normalize(s: &str) -> String {
    WHITESPACE_RE.replace_all(s, " ").trim().to_string()
}

/// Strip one unwanted trailing artifact from an extracted value
///
/// Suffixes are tried in order and the first match is stripped, then the
/// result is trimmed. At most one suffix is removed. A value that ends with
/// none of them is returned untouched, and an absent value stays absent.
///
/// # Examples
///
/// ```
/// use markguard_extractor::clean_suffix;
///
/// assert_eq!(clean_suffix(Some("9Application#:"), &["Application#:"]).as_deref(), Some("9"));
/// assert_eq!(clean_suffix(Some("9"), &["Application#:"]).as_deref(), Some("9"));
/// assert_eq!(clean_suffix(None, &["Application#:"]), None);
/// ```
pub fn clean_suffix(value: Option<&str>, suffixes: &[&str]) -> Option<String> {
    let value = value?;
    let stripped = suffixes
        .iter()
        .filter(|suffix| !suffix.is_empty())
        .find_map(|suffix| value.strip_suffix(suffix));

    match stripped {
        Some(rest) => Some(rest.trim().to_string()),
        None => Some(value.to_string()),
    }
}
