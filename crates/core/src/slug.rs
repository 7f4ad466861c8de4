//! Slugification: deriving a URL-safe identifier from free text.
//!
//! Lowercase, whitespace and punctuation runs collapse to single hyphens,
//! everything outside `[a-z0-9-]` is dropped.

/// Derive a URL-safe slug from free text.
///
/// `slugify("Red Shoes")` is `"red-shoes"`. The result contains only
/// lowercase ASCII alphanumerics separated by single hyphens, with no
/// leading or trailing hyphen. Text with no usable characters yields an
/// empty slug; callers decide whether that is acceptable.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            // Separators and punctuation collapse into one hyphen.
            pending_hyphen = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Red Shoes"), "red-shoes");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(slugify("  Deluxe --  Winter   Coat "), "deluxe-winter-coat");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(slugify("Kids' Shoes (size 7)"), "kids-shoes-size-7");
    }

    #[test]
    fn empty_and_symbol_only_input_yield_empty_slug() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn already_slugged_text_is_unchanged() {
        assert_eq!(slugify("red-shoes"), "red-shoes");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: output alphabet is [a-z0-9-], no edge hyphens.
            #[test]
            fn output_is_url_safe(input in ".{0,200}") {
                let slug = slugify(&input);
                prop_assert!(slug
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
                prop_assert!(!slug.starts_with('-'));
                prop_assert!(!slug.ends_with('-'));
                prop_assert!(!slug.contains("--"));
            }

            /// Property: slugify is idempotent.
            #[test]
            fn idempotent(input in ".{0,200}") {
                let once = slugify(&input);
                prop_assert_eq!(slugify(&once), once);
            }
        }
    }
}
