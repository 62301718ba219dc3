//! Utilities for sanitizing values before they appear in object keys.
//!
//! Certificate numbers and company names come straight from a scraped HTML
//! table and can contain spaces, slashes, or punctuation that has no place
//! in an object key.

/// Sanitizes one object-key component.
///
/// Every character outside the word class (letters, digits, underscore),
/// `-`, and `.` is replaced with `_`. Non-ASCII letters and digits are kept,
/// matching how the registry prints international company names.
///
/// # Arguments
///
/// * `component` - The raw value destined for an object key
///
/// # Returns
///
/// A sanitized copy that is safe to embed between `/` separators in a key.
pub fn sanitize_key_component(component: &str) -> String {
    component
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Truncates a string to at most `max_chars` characters.
///
/// Operates on character boundaries, so multi-byte names are never split
/// mid-character.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_separators() {
        assert_eq!(
            sanitize_key_component("Acme Biofuels GmbH & Co. KG"),
            "Acme_Biofuels_GmbH___Co._KG"
        );
        assert_eq!(sanitize_key_component("a/b\\c"), "a_b_c");
    }

    #[test]
    fn test_sanitize_keeps_safe_characters() {
        assert_eq!(
            sanitize_key_component("EU-ISCC-Cert-DE100-12345.v2_final"),
            "EU-ISCC-Cert-DE100-12345.v2_final"
        );
    }

    #[test]
    fn test_sanitize_keeps_non_ascii_letters() {
        assert_eq!(sanitize_key_component("Müller Öl"), "Müller_Öl");
    }

    #[test]
    fn test_truncate_chars_handles_multibyte() {
        assert_eq!(truncate_chars("Überlandwerk", 4), "Über");
        assert_eq!(truncate_chars("short", 50), "short");
        assert_eq!(truncate_chars("", 10), "");
    }
}
