//! Manifest node types

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// File or directory classification of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

/// One entry of the nested manifest tree
///
/// Serializes as `{"type": "file", "name": ..}` or
/// `{"type": "directory", "name": .., "children": [..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    File {
        name: String,
    },
    Directory {
        name: String,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn file(name: impl Into<String>) -> Self {
        Node::File { name: name.into() }
    }

    pub fn directory(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Directory {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::File { name } | Node::Directory { name, .. } => name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File { .. } => NodeKind::File,
            Node::Directory { .. } => NodeKind::Directory,
        }
    }

    /// Children of a directory; `None` for files
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::File { .. } => None,
            Node::Directory { children, .. } => Some(children.as_slice()),
        }
    }

    /// Direct child lookup by exact name
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children()?.iter().find(|c| c.name() == name)
    }

    /// Resolve a slash-separated path relative to this node
    pub fn lookup(&self, path: &str) -> Option<&Node> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Total number of nodes in this subtree, including `self`
    pub fn count(&self) -> usize {
        1 + self
            .children()
            .map(|c| c.iter().map(Node::count).sum())
            .unwrap_or(0)
    }

    /// Number of file nodes in this subtree
    pub fn file_count(&self) -> usize {
        match self {
            Node::File { .. } => 1,
            Node::Directory { children, .. } => children.iter().map(Node::file_count).sum(),
        }
    }

    /// Find the first directory (depth-first) holding two children with the same name.
    ///
    /// Returns the duplicated name. Builders never produce such trees; this exists
    /// for checking trees that came from elsewhere (e.g. deserialized manifests).
    pub fn find_duplicate_sibling(&self) -> Option<&str> {
        let children = self.children()?;
        let mut seen = HashSet::with_capacity(children.len());
        for child in children {
            if !seen.insert(child.name()) {
                return Some(child.name());
            }
        }
        children.iter().find_map(Node::find_duplicate_sibling)
    }
}
