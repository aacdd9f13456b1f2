//! Integration tests for the git listing source against a real repository

use filelist::error::{ApiError, PathSourceError};
use filelist::source::{ListingSource, PathSource};
use filelist::tree::Node;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) -> bool {
    Command::new("git")
        .args(["-c", "user.name=filelist", "-c", "user.email=filelist@localhost"])
        .args(args)
        .current_dir(dir)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Repository with `files` committed, or `None` without git
fn repo_with(files: &[&str]) -> Option<TempDir> {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    if !git(dir, &["init", "-q"]) {
        return None;
    }

    for file in files {
        let path = dir.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    if !git(dir, &["add", "."]) || !git(dir, &["commit", "-q", "-m", "initial"]) {
        return None;
    }
    Some(temp_dir)
}

/// Repository with two committed files and one untracked file, or `None` without git
fn committed_repo() -> Option<TempDir> {
    let repo = repo_with(&["src/lib/init.lua", "src/main.lua", "README.md"])?;
    fs::write(repo.path().join("src").join("untracked.lua"), "").unwrap();
    Some(repo)
}

/// Test that only committed files under the prefix are listed
#[test]
fn test_git_listing_builds_tree_of_tracked_files() {
    let Some(repo) = committed_repo() else {
        return;
    };

    let source = ListingSource::git(repo.path(), "HEAD", "src");
    let tree = source.build_tree().unwrap();

    assert_eq!(tree.name(), "src");
    assert_eq!(tree.file_count(), 2);
    assert_eq!(tree.lookup("lib/init.lua"), Some(&Node::file("init.lua")));
    assert!(tree.child("untracked.lua").is_none());
    assert!(tree.child("README.md").is_none());
}

/// Test that an unknown revision is reported with the command's stderr
#[test]
fn test_git_listing_unknown_ref_fails() {
    let Some(repo) = committed_repo() else {
        return;
    };

    let source = ListingSource::git(repo.path(), "no-such-ref", "src");
    match source.build_tree() {
        Err(ApiError::PathSource(PathSourceError::CommandFailed { stderr, .. })) => {
            assert!(!stderr.is_empty())
        }
        other => panic!("expected command failure, got {other:?}"),
    }
}

/// Test that names git would quote by default are listed verbatim
#[cfg(unix)]
#[test]
fn test_git_listing_keeps_unusual_names_verbatim() {
    let decomposed = "cafe\u{301}.lua";
    let files = [
        "src/caf\u{e9}.lua".to_string(),
        "src/a\"b.lua".to_string(),
        "src/a b.lua".to_string(),
        "src/back\\slash.lua".to_string(),
        format!("src/nfd/{}", decomposed),
    ];
    let names: Vec<&str> = files.iter().map(String::as_str).collect();
    let Some(repo) = repo_with(&names) else {
        return;
    };

    let source = ListingSource::git(repo.path(), "HEAD", "src");
    let tree = source.build_tree().unwrap();

    assert_eq!(tree.file_count(), 5);
    assert_eq!(tree.child("caf\u{e9}.lua"), Some(&Node::file("caf\u{e9}.lua")));
    assert_eq!(tree.child("a\"b.lua"), Some(&Node::file("a\"b.lua")));
    assert_eq!(tree.child("a b.lua"), Some(&Node::file("a b.lua")));
    assert_eq!(tree.child("back\\slash.lua"), Some(&Node::file("back\\slash.lua")));
    assert_eq!(tree.lookup(&format!("nfd/{}", decomposed)), Some(&Node::file(decomposed)));

    let flat = source.flat_paths().unwrap();
    assert!(flat.contains(&"a\"b.lua".to_string()));
    assert!(flat.contains(&format!("nfd/{}", decomposed)));
}
