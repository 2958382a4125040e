//! Property-based tests for entry id and display name formatting.
//!
//! These tests use proptest to generate random display names and verify that
//! the formatted values always satisfy the catalog's naming rules.

#[cfg(test)]
mod proptest_tests {
    use crate::factory::{
        format_display_name, format_id, make_entry_id, DISPLAY_NAME_MAX_BYTES,
        ENTRY_ID_MAX_LENGTH,
    };
    use proptest::prelude::*;

    // ============================================================================
    // format_id property tests
    // ============================================================================

    proptest! {
        /// Property: format_id only emits letters, digits and underscores
        #[test]
        fn format_id_only_produces_allowed_chars(input in ".*") {
            let result = format_id(&input);
            prop_assert!(
                result.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "format_id produced '{}' from input '{}'",
                result,
                input
            );
        }

        /// Property: format_id never exceeds the entry id length limit
        #[test]
        fn format_id_respects_max_length(input in ".{0,200}") {
            prop_assert!(format_id(&input).len() <= ENTRY_ID_MAX_LENGTH);
        }

        /// Property: format_id never starts with a digit
        #[test]
        fn format_id_never_starts_with_digit(input in ".+") {
            let result = format_id(&input);
            prop_assert!(!result.starts_with(|c: char| c.is_ascii_digit()));
        }

        /// Property: format_id is deterministic (same input = same output)
        #[test]
        fn format_id_is_deterministic(input in ".*") {
            prop_assert_eq!(format_id(&input), format_id(&input));
        }

        /// Property: short identifiers made of allowed chars pass through unchanged
        #[test]
        fn format_id_preserves_valid_ids(input in "[a-zA-Z_][a-zA-Z0-9_]{0,62}") {
            prop_assert_eq!(format_id(&input), input);
        }
    }

    // ============================================================================
    // make_entry_id property tests
    // ============================================================================

    proptest! {
        /// Property: entry ids are lowercase
        #[test]
        fn make_entry_id_is_lowercase(input in ".*") {
            let result = make_entry_id(&input);
            prop_assert!(!result.chars().any(|c| c.is_ascii_uppercase()));
        }

        /// Property: applying make_entry_id twice gives the same id
        #[test]
        fn make_entry_id_is_idempotent(input in ".*") {
            let once = make_entry_id(&input);
            prop_assert_eq!(make_entry_id(&once), once.clone());
        }

        /// Property: names differing only in case map to the same id
        #[test]
        fn make_entry_id_ignores_ascii_case(input in "[a-zA-Z0-9 ]{1,40}") {
            prop_assert_eq!(
                make_entry_id(&input.to_uppercase()),
                make_entry_id(&input.to_lowercase())
            );
        }
    }

    // ============================================================================
    // format_display_name property tests
    // ============================================================================

    proptest! {
        /// Property: display names never exceed the byte limit
        #[test]
        fn format_display_name_respects_byte_limit(input in ".{0,400}") {
            prop_assert!(format_display_name(&input).len() <= DISPLAY_NAME_MAX_BYTES);
        }

        /// Property: formatting never adds characters
        #[test]
        fn format_display_name_never_grows_char_count(input in ".*") {
            prop_assert!(
                format_display_name(&input).chars().count() <= input.chars().count()
            );
        }

        /// Property: letters, digits, spaces, hyphens and underscores survive
        #[test]
        fn format_display_name_preserves_allowed_chars(input in "[a-zA-Z0-9 _-]{0,100}") {
            prop_assert_eq!(format_display_name(&input), input);
        }
    }
}
