//! Property-based tests for tree construction from listings

use filelist::manifest::Manifest;
use filelist::tree::flatten::leaf_paths;
use filelist::tree::TrieBuilder;
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Slash-separated path whose intermediate segments never carry the file extension
fn listing_path() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[a-d]{1,2}", 0..4),
        "[a-d]{1,2}",
        any::<bool>(),
    )
        .prop_map(|(mut segments, leaf, is_file)| {
            segments.push(if is_file { format!("{}.lua", leaf) } else { leaf });
            segments.join("/")
        })
}

/// Drop every path that is a segment-wise prefix of another
fn prefix_free(paths: &[String]) -> BTreeSet<String> {
    let all: BTreeSet<&String> = paths.iter().collect();
    all.iter()
        .filter(|p| {
            !all.iter()
                .any(|q| q.starts_with(&format!("{}/", p)) || p.starts_with(&format!("{}/", q)))
        })
        .map(|p| p.to_string())
        .collect()
}

/// Test that every prefix-free listing is recovered exactly from its tree
#[test]
fn test_leaf_paths_recover_listing_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &prop::collection::vec(listing_path(), 0..24),
            |paths| {
                let expected = prefix_free(&paths);
                let tree = TrieBuilder::new("src").build(&expected).unwrap();

                let recovered: BTreeSet<String> = leaf_paths(&tree).into_iter().collect();
                prop_assert_eq!(recovered, expected);
                Ok(())
            },
        )
        .unwrap();
}

/// Test that sibling names stay unique whatever the insertion order
#[test]
fn test_sibling_names_unique_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(listing_path(), 0..32), |paths| {
            let tree = TrieBuilder::new("").build(&paths).unwrap();
            prop_assert_eq!(tree.find_duplicate_sibling(), None);
            Ok(())
        })
        .unwrap();
}

/// Test that insertion order changes sibling order but never the set of leaves
#[test]
fn test_insertion_order_independence_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(listing_path(), 0..16), |paths| {
            let builder = TrieBuilder::new("");
            let forward = builder.build(&paths).unwrap();
            let reversed = builder.build(paths.iter().rev()).unwrap();

            prop_assert_eq!(forward.count(), reversed.count());
            let forward_leaves: BTreeSet<String> = leaf_paths(&forward).into_iter().collect();
            let reversed_leaves: BTreeSet<String> = leaf_paths(&reversed).into_iter().collect();
            prop_assert_eq!(forward_leaves, reversed_leaves);
            Ok(())
        })
        .unwrap();
}

/// Test that pretty and compact renderings always parse to the same document
#[test]
fn test_renderings_equivalent_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(listing_path(), 0..16), 0usize..8),
            |(paths, indent)| {
                let tree = TrieBuilder::new("src").build(&paths).unwrap();
                let manifest = Manifest::tree("https://cdn/", tree);

                let pretty: serde_json::Value =
                    serde_json::from_slice(&manifest.render_pretty(indent).unwrap()).unwrap();
                let compact: serde_json::Value =
                    serde_json::from_slice(&manifest.render_compact().unwrap()).unwrap();
                prop_assert_eq!(pretty, compact);
                Ok(())
            },
        )
        .unwrap();
}
