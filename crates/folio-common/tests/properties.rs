//! Property-based tests for sanitization and label composition.

use folio_common::sanitize::{FALLBACK_TOKEN, MAX_TOKEN_LEN};
use folio_common::{sanitize, Label, StorageFormat};
use proptest::prelude::*;

// ============================================================================
// sanitize properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Re-applying sanitize changes nothing.
    #[test]
    fn sanitize_idempotent(title in any::<String>()) {
        let once = sanitize(&title);
        prop_assert_eq!(sanitize(&once), once);
    }

    /// Output never exceeds the length limit and is never empty.
    #[test]
    fn sanitize_bounded(title in any::<String>()) {
        let token = sanitize(&title);
        prop_assert!(!token.is_empty());
        prop_assert!(token.len() <= MAX_TOKEN_LEN);
    }

    /// Output only uses lowercase ASCII letters, digits and underscores.
    #[test]
    fn sanitize_alphabet(title in any::<String>()) {
        let token = sanitize(&title);
        prop_assert!(token
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
    }

    /// Long alphanumeric titles are cut to exactly the limit.
    #[test]
    fn sanitize_truncates_long_titles(title in "[A-Za-z0-9 ]{51,200}") {
        prop_assert_eq!(sanitize(&title).len(), MAX_TOKEN_LEN);
    }
}

#[test]
fn sanitize_reference_values() {
    assert_eq!(sanitize(""), FALLBACK_TOKEN);
    assert_eq!(sanitize("Revenue Report!!"), "revenue_report");
    assert_eq!(sanitize("Cost Analysis"), "cost_analysis");
}

// ============================================================================
// Label properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Splitting at the last separator recovers parent and field.
    #[test]
    fn compose_split_round_trip(parent in "[a-z.]{1,20}", field in "[a-z_][a-z0-9_]{0,15}") {
        let label = Label::compose(&Label::new(parent.clone()), &field).unwrap();
        prop_assert_eq!(label.split_last(), Some((parent.as_str(), field.as_str())));
    }

    /// Field names holding the separator never compose.
    #[test]
    fn compose_rejects_separator_in_field(head in "[a-z]{0,8}", tail in "[a-z]{0,8}") {
        let field = format!("{head}{}{tail}", Label::SEPARATOR);
        prop_assert!(Label::compose(&Label::new("book"), &field).is_err());
    }
}

#[test]
fn storage_format_rejects_near_misses() {
    for token in ["csv", "json", "csv-embedded", "Parquet", " parquet", ""] {
        assert!(
            token.parse::<StorageFormat>().is_err(),
            "'{token}' should not parse"
        );
    }
}
