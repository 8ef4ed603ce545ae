//! Property tests for the pattern formatter and descriptor equality.

use holdgen::{
    ArtifactKind, Descriptor, SubstitutionMap, format_robust, format_simple,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn key_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,20}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9 ]{0,10}"
}

fn literal_strategy() -> impl Strategy<Value = String> {
    "[a-z .;()\n]{0,12}"
}

/// A map with distinct keys, as sorted pairs.
fn pairs_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 1..8)
        .prop_map(|map: BTreeMap<String, String>| map.into_iter().collect())
}

fn to_map(pairs: &[(String, String)]) -> SubstitutionMap {
    SubstitutionMap::try_from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), Some(v.as_str()))))
        .unwrap()
}

/// Interleave literal runs with `{Key}` tokens picked from `keys`, plus an
/// unknown key and some stray braces.
fn pattern_strategy(keys: Vec<String>) -> impl Strategy<Value = String> {
    let token = prop_oneof![
        literal_strategy(),
        prop::sample::select(keys).prop_map(|k| format!("{{{k}}}")),
        Just("{Unknown}".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("{\n}".to_string()),
    ];
    prop::collection::vec(token, 0..12).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn text_without_braces_is_unchanged(
        literal in literal_strategy(),
        pairs in pairs_strategy(),
    ) {
        let map = to_map(&pairs);
        prop_assert_eq!(format_simple(&literal, &map), literal.clone());
        prop_assert_eq!(format_robust(&literal, &map), literal);
    }

    #[test]
    fn simple_and_robust_agree(
        (pairs, pattern) in pairs_strategy().prop_flat_map(|pairs| {
            let keys = pairs.iter().map(|(k, _)| k.clone()).collect();
            (Just(pairs), pattern_strategy(keys))
        })
    ) {
        let map = to_map(&pairs);
        prop_assert_eq!(format_simple(&pattern, &map), format_robust(&pattern, &map));
    }

    #[test]
    fn formatting_is_deterministic(
        (pairs, pattern) in pairs_strategy().prop_flat_map(|pairs| {
            let keys = pairs.iter().map(|(k, _)| k.clone()).collect();
            (Just(pairs), pattern_strategy(keys))
        })
    ) {
        let map = to_map(&pairs);
        prop_assert_eq!(format_simple(&pattern, &map), format_simple(&pattern, &map));
        prop_assert_eq!(format_robust(&pattern, &map), format_robust(&pattern, &map));

        // A map rebuilt in reverse order formats the same way.
        let reversed: Vec<_> = pairs.iter().rev().cloned().collect();
        let other = to_map(&reversed);
        prop_assert_eq!(format_simple(&pattern, &map), format_simple(&pattern, &other));
        prop_assert_eq!(format_robust(&pattern, &map), format_robust(&pattern, &other));
    }

    #[test]
    fn formatting_resolved_output_again_is_stable(
        (pairs, parts) in pairs_strategy().prop_flat_map(|pairs| {
            let keys: Vec<String> = pairs.iter().map(|(k, _)| k.clone()).collect();
            let part = prop_oneof![
                literal_strategy(),
                prop::sample::select(keys).prop_map(|k| format!("{{{k}}}")),
            ];
            (Just(pairs), prop::collection::vec(part, 0..10))
        })
    ) {
        let map = to_map(&pairs);
        let pattern = parts.concat();
        let once = format_robust(&pattern, &map);
        prop_assert!(!once.contains('{'), "unresolved brace in output");
        prop_assert_eq!(format_robust(&once, &map), once);
    }

    #[test]
    fn descriptor_ignores_insertion_order(
        (pairs, shuffled) in pairs_strategy().prop_flat_map(|pairs| {
            let shuffled = Just(pairs.clone()).prop_shuffle();
            (Just(pairs), shuffled)
        })
    ) {
        let a = Descriptor::new("Thing", ArtifactKind::ResultHolder, to_map(&pairs));
        let b = Descriptor::new("Thing", ArtifactKind::ResultHolder, to_map(&shuffled));
        prop_assert_eq!(a.fingerprint(), b.fingerprint());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn descriptor_detects_any_single_value_change(
        (pairs, index) in pairs_strategy().prop_flat_map(|pairs| {
            let len = pairs.len();
            (Just(pairs), 0..len)
        })
    ) {
        let mut changed = pairs.clone();
        changed[index].1.push('!');

        let a = Descriptor::new("Thing", ArtifactKind::OptionHolder, to_map(&pairs));
        let b = Descriptor::new("Thing", ArtifactKind::OptionHolder, to_map(&changed));
        prop_assert_ne!(a, b);
    }
}
