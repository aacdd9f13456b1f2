//! Integration tests for nested tree structure from flat listings

use filelist::error::{ApiError, TreeError};
use filelist::source::{ListingSource, PathSource};
use filelist::tree::{Node, NodeKind, TrieBuilder};
use serde_json::Value;

/// Test the documented end-to-end example
#[test]
fn test_example_listing_builds_expected_tree() {
    let tree = TrieBuilder::new("")
        .build(["lib/init.lua", "lib/sub/a.lua", "main.lua"])
        .unwrap();

    let children = tree.children().unwrap();
    assert_eq!(children.len(), 2);

    assert_eq!(children[0].name(), "lib");
    assert_eq!(children[0].kind(), NodeKind::Directory);
    let lib = children[0].children().unwrap();
    assert_eq!(lib[0], Node::file("init.lua"));
    assert_eq!(lib[1], Node::directory("sub", vec![Node::file("a.lua")]));

    assert_eq!(children[1], Node::file("main.lua"));
}

/// Test that root is always a directory, even for an empty listing
#[test]
fn test_root_is_directory() {
    let source = ListingSource::from_text("", "src");
    let tree = source.build_tree().unwrap();
    assert_eq!(tree.kind(), NodeKind::Directory);
    assert_eq!(tree.children().map(<[Node]>::len), Some(0));
}

/// Test that files never carry `children` and directories always do
#[test]
fn test_children_field_presence() {
    let tree = TrieBuilder::new("src")
        .build(["a/b.lua", "c.lua", "empty"])
        .unwrap();
    let value = serde_json::to_value(&tree).unwrap();

    fn check(value: &Value) {
        match value["type"].as_str() {
            Some("file") => assert!(value.get("children").is_none()),
            Some("directory") => {
                let children = value["children"].as_array().expect("directory children");
                children.iter().for_each(check);
            }
            other => panic!("unexpected type {other:?}"),
        }
    }
    check(&value);
}

/// Test that a file used as a directory is reported, not silently merged
#[test]
fn test_conflict_through_source() {
    let source = ListingSource::from_text("src/x.lua\nsrc/x.lua/y.lua\n", "src");
    match source.build_tree() {
        Err(ApiError::Tree(TreeError::StructuralConflict { segment, .. })) => {
            assert_eq!(segment, "x.lua")
        }
        other => panic!("expected structural conflict, got {other:?}"),
    }
}

/// Test that repeated prefixes across many paths never duplicate siblings
#[test]
fn test_sibling_names_unique_for_interleaved_listing() {
    let listing = [
        "a/x.lua", "b/y.lua", "a/z.lua", "a/q/r.lua", "b/y.lua", "a/q/s.lua", "c.lua",
    ];
    let tree = TrieBuilder::new("").build(listing).unwrap();
    assert!(tree.find_duplicate_sibling().is_none());
    assert_eq!(tree.file_count(), 6);
}
