//! Whitespace normalization.
//!
//! Uses Unicode's definition of whitespace (tabs, newlines, NBSP, ...).
//!
//! ```rust
//! use canonical::collapse_whitespace;
//!
//! assert_eq!(collapse_whitespace("  native   gold  "), "native gold");
//! assert_eq!(collapse_whitespace("hello\u{00A0}world"), "hello world");
//! assert_eq!(collapse_whitespace("   \n\t   "), "");
//! ```

/// Collapses whitespace runs into single ASCII spaces and trims both ends.
///
/// Useful for callers that only need whitespace cleanup and not the rest of
/// [`normalize`](crate::normalize).
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
