//! Slug derivation for category names.
//!
//! Slugs are trimmed, lowercase identifiers with whitespace runs collapsed
//! to single hyphens. Category uniqueness is keyed on the slug, so two
//! spellings of the same name ("Korean BBQ", "korean bbq ") resolve to the
//! same category.

/// Derive the canonical slug for a free-text category name.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Return `true` when `value` is already a canonical slug.
#[must_use]
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value == value.trim()
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Korean BBQ", "korean-bbq")]
    #[case("Korean BBQ ", "korean-bbq")]
    #[case("  Fast   Food  ", "fast-food")]
    #[case("pizza", "pizza")]
    fn slugify_normalises_case_and_whitespace(#[case] name: &str, #[case] slug: &str) {
        assert_eq!(slugify(name), slug);
    }

    #[rstest]
    #[case("korean-bbq", true)]
    #[case("pizza2", true)]
    #[case("", false)]
    #[case("Korean", false)]
    #[case("korean bbq", false)]
    fn slug_validity(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(is_valid_slug(value), valid);
    }

    #[rstest]
    fn slugify_output_is_always_valid() {
        for name in ["Korean BBQ", " Tex  Mex ", "Sushi"] {
            assert!(is_valid_slug(&slugify(name)));
        }
    }
}
