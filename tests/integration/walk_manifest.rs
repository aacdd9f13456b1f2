//! Integration tests for the filesystem-walk source

use filelist::manifest::{Layout, Manifest, ManifestPaths};
use filelist::source::{DirectorySource, ListingSource, PathSource};
use filelist::tree::walker::WalkerConfig;
use filelist::tree::{Node, NodeKind};
use std::fs;
use tempfile::TempDir;

fn sorted() -> WalkerConfig {
    WalkerConfig {
        sort_entries: true,
        ..WalkerConfig::default()
    }
}

fn sample_src() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    fs::create_dir_all(src.join("lib").join("sub")).unwrap();
    fs::write(src.join("lib").join("init.lua"), "return {}").unwrap();
    fs::write(src.join("lib").join("sub").join("a.lua"), "").unwrap();
    fs::write(src.join("main.lua"), "").unwrap();
    temp_dir
}

/// Test that walking and listing the same files produce the same tree
#[test]
fn test_walk_and_listing_agree() {
    let temp_dir = sample_src();
    let walked = DirectorySource::new(temp_dir.path().join("src"))
        .with_config(sorted())
        .build_tree()
        .unwrap();

    let listed = ListingSource::from_text(
        "src/lib/init.lua\nsrc/lib/sub/a.lua\nsrc/main.lua\n",
        "src",
    )
    .build_tree()
    .unwrap();

    assert_eq!(walked, listed);
}

/// Test that an empty directory survives as a directory with no children
#[test]
fn test_empty_directory_kept_in_tree() {
    let temp_dir = sample_src();
    fs::create_dir_all(temp_dir.path().join("src").join("assets")).unwrap();

    let tree = DirectorySource::new(temp_dir.path().join("src"))
        .with_config(sorted())
        .build_tree()
        .unwrap();

    let assets = tree.child("assets").unwrap();
    assert_eq!(assets.kind(), NodeKind::Directory);
    assert_eq!(assets.children(), Some(&[][..]));
}

/// Test flat layout with sentinel entries for file-less directories
#[test]
fn test_flat_manifest_marks_empty_directories() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    fs::create_dir_all(root.join("foo").join("bar")).unwrap();
    fs::write(root.join("x.lua"), "").unwrap();

    let source = DirectorySource::new(&root).with_config(sorted());
    let manifest = Manifest::from_source(&source, Layout::Flat, "https://cdn/").unwrap();

    match &manifest.paths {
        ManifestPaths::Flat(paths) => {
            assert_eq!(paths, &["x.lua", "foo/EMPTY", "foo/bar/EMPTY"]);
        }
        ManifestPaths::Tree(_) => panic!("expected flat paths"),
    }
}

/// Test that a root with no files at all yields the bare sentinel
#[test]
fn test_flat_manifest_for_fileless_root() {
    let temp_dir = TempDir::new().unwrap();
    let source = DirectorySource::new(temp_dir.path());
    let manifest = Manifest::from_source(&source, Layout::Flat, "https://cdn/").unwrap();

    let json: serde_json::Value =
        serde_json::from_slice(&manifest.render_compact().unwrap()).unwrap();
    assert_eq!(json["paths"], serde_json::json!(["EMPTY"]));
}

/// Test that ignore patterns prune both files and directories
#[test]
fn test_ignore_patterns_apply_to_walk() {
    let temp_dir = sample_src();
    let src = temp_dir.path().join("src");
    fs::create_dir_all(src.join(".git")).unwrap();
    fs::write(src.join(".git").join("HEAD"), "ref").unwrap();

    let config = WalkerConfig {
        ignore_patterns: vec![".git".to_string(), "sub".to_string()],
        sort_entries: true,
        ..WalkerConfig::default()
    };
    let tree = DirectorySource::new(&src).with_config(config).build_tree().unwrap();

    assert!(tree.child(".git").is_none());
    assert!(tree.lookup("lib/sub").is_none());
    assert_eq!(
        tree.lookup("lib/init.lua"),
        Some(&Node::file("init.lua"))
    );
}
