//! Flat path views of trees and walks

use crate::tree::node::Node;
use crate::tree::walker::Entry;
use std::collections::HashSet;

/// Reserved final segment marking a directory with no files anywhere beneath it
pub const EMPTY_SENTINEL: &str = "EMPTY";

/// Root-relative paths of every leaf: files plus directories without children
///
/// The root's own name is not part of the emitted paths.
pub fn leaf_paths(root: &Node) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(children) = root.children() {
        for child in children {
            collect_leaves(child, "", &mut out);
        }
    }
    out
}

fn collect_leaves(node: &Node, prefix: &str, out: &mut Vec<String>) {
    let path = join(prefix, node.name());
    match node {
        Node::File { .. } => out.push(path),
        Node::Directory { children, .. } if children.is_empty() => out.push(path),
        Node::Directory { children, .. } => {
            for child in children {
                collect_leaves(child, &path, out);
            }
        }
    }
}

/// Flat listing of a walk, in discovery order
///
/// Files are listed as-is. Every directory with no file anywhere beneath it is
/// listed as `<dir>/EMPTY`; a walk without any files also yields a bare `EMPTY`
/// for the root.
pub fn sentinel_paths(entries: &[Entry]) -> Vec<String> {
    let mut populated: HashSet<&str> = HashSet::new();
    for entry in entries {
        if let Entry::File { path } = entry {
            let mut current = path.as_str();
            while let Some((parent, _)) = current.rsplit_once('/') {
                if !populated.insert(parent) {
                    break;
                }
                current = parent;
            }
        }
    }

    let mut out = Vec::with_capacity(entries.len());
    let mut any_file = false;
    for entry in entries {
        match entry {
            Entry::File { path } => {
                any_file = true;
                out.push(path.clone());
            }
            Entry::Directory { path } if !populated.contains(path.as_str()) => {
                out.push(join(path, EMPTY_SENTINEL));
            }
            Entry::Directory { .. } => {}
        }
    }

    if !any_file {
        out.insert(0, EMPTY_SENTINEL.to_string());
    }
    out
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}
