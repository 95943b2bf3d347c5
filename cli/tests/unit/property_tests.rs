//! Property-based tests for identifier validation and `--set` escaping.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use qd2_cli::domain::helm_set::{escape_value, flatten_to_set_expressions};
use qd2_cli::domain::identifier::is_valid_identifier;
use qd2_cli::domain::values::{deep_merge, placement_values};
use serde_yaml::{Mapping, Value};

// ============================================================================
// Identifier validation
// ============================================================================

proptest! {
    /// Strings built only from the allowed alphabet are accepted.
    #[test]
    fn prop_allowed_alphabet_is_valid(s in "[A-Za-z0-9_-]{1,40}") {
        prop_assert!(is_valid_identifier(&s), "rejected: {:?}", s);
    }

    /// A single disallowed character anywhere makes the identifier invalid.
    #[test]
    fn prop_foreign_character_is_invalid(
        prefix in "[a-z0-9]{0,10}",
        bad in "[ .,:/=@!A-Za-z0-9_-]",
        suffix in "[a-z0-9]{0,10}",
    ) {
        let candidate = format!("{prefix}{bad}{suffix}");
        let expected = bad.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        prop_assert_eq!(is_valid_identifier(&candidate), expected, "candidate: {:?}", candidate);
    }
}

#[test]
fn test_empty_identifier_is_invalid() {
    assert!(!is_valid_identifier(""));
}

// ============================================================================
// escape_value()
// ============================================================================

proptest! {
    /// Every comma in the input comes out backslash-escaped.
    #[test]
    fn prop_commas_are_always_escaped(s in "[a-z, ]{0,30}") {
        let escaped = escape_value(&s);
        let commas = s.matches(',').count();
        prop_assert_eq!(escaped.matches(r"\,").count(), commas);
    }

    /// Values without special characters pass through unchanged.
    #[test]
    fn prop_plain_values_are_unchanged(s in "[A-Za-z0-9._/-]{0,30}") {
        prop_assert_eq!(escape_value(&s), s);
    }

    /// A space forces wrapping in double quotes.
    #[test]
    fn prop_space_forces_quotes(a in "[a-z]{1,10}", b in "[a-z]{1,10}") {
        let escaped = escape_value(&format!("{a} {b}"));
        prop_assert!(escaped.starts_with('"') && escaped.ends_with('"'), "got: {}", escaped);
    }
}

// ============================================================================
// deep_merge() / flatten
// ============================================================================

proptest! {
    /// Merging an empty override is the identity.
    #[test]
    fn prop_merge_with_empty_override_is_identity(node in "[a-z0-9-]{1,20}") {
        let base = placement_values(&node);
        prop_assert_eq!(deep_merge(base.clone(), &Mapping::new()), base);
    }

    /// A scalar override replaces the placement subtree wholesale.
    #[test]
    fn prop_scalar_override_replaces_tree(node in "[a-z0-9-]{1,20}", n in any::<i64>()) {
        let mut overrides = Mapping::new();
        overrides.insert("placement".into(), n.into());
        let merged = deep_merge(placement_values(&node), &overrides);
        prop_assert_eq!(merged.get("placement"), Some(&Value::from(n)));
    }

    /// The placement block always flattens to the same three expressions.
    #[test]
    fn prop_placement_flattens_to_three_expressions(node in "[A-Za-z0-9_-]{1,20}") {
        let exprs = flatten_to_set_expressions(&placement_values(&node));
        prop_assert_eq!(
            exprs,
            vec![
                "placement.nodeSelector={}".to_string(),
                "placement.useNodeName=true".to_string(),
                format!("placement.nodeName={node}"),
            ]
        );
    }
}
