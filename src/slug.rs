//! Slug normalization and validation for documentation entries.
//!
//! A stored slug always matches `[a-z0-9-]+`: non-empty, lowercase
//! alphanumerics and single hyphens, no leading or trailing hyphen.

/// Normalizes a candidate slug: lowercase, spaces become hyphens, every
/// other character outside `[a-z0-9-]` is stripped, hyphen runs collapse
/// to one, and leading/trailing hyphens are trimmed.
///
/// The result is not guaranteed non-empty; callers must check
/// [`is_valid`] before storing it.
pub fn normalize(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    for c in raw.chars() {
        let c = match c {
            ' ' => '-',
            other => other.to_ascii_lowercase(),
        };
        match c {
            'a'..='z' | '0'..='9' => slug.push(c),
            '-' => {
                // No leading hyphen and no runs; the single possible
                // trailing hyphen is trimmed below.
                if !slug.is_empty() && !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            _ => {}
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// True when `slug` is non-empty and composed solely of lowercase
/// letters, digits, and hyphens.
pub fn is_valid(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::{is_valid, normalize};

    #[test]
    fn normalizes_mixed_case_spaces_and_punctuation() {
        assert_eq!(normalize("  My Guide!! v2  "), "my-guide-v2");
        assert_eq!(normalize("Getting Started"), "getting-started");
        assert_eq!(normalize("API--Reference"), "api-reference");
        assert_eq!(normalize("--edge--"), "edge");
        assert_eq!(normalize("-abc"), "abc");
        assert_eq!(normalize("Ünïcode Títle"), "ncode-ttle");
    }

    #[test]
    fn already_clean_slugs_pass_through() {
        assert_eq!(normalize("my-guide-v2"), "my-guide-v2");
        assert_eq!(normalize("a"), "a");
        assert_eq!(normalize("2024-review"), "2024-review");
    }

    #[test]
    fn normalized_output_is_always_valid_or_empty() {
        for raw in ["  My Guide!! v2  ", "!!!", "a b c", "-", "___", "Ok"] {
            let slug = normalize(raw);
            assert!(slug.is_empty() || is_valid(slug.as_str()), "raw={raw:?}");
            assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            assert!(!slug.contains("--"));
        }
    }

    #[test]
    fn validity_requires_nonempty_lowercase_charset() {
        assert!(is_valid("my-guide-v2"));
        assert!(!is_valid(""));
        assert!(!is_valid("My-Guide"));
        assert!(!is_valid("has space"));
        assert!(!is_valid("sneaky_underscore"));
    }
}
