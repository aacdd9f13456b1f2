//! Incremental tree builder for flat path listings
//!
//! Each distinct segment prefix maps to exactly one node; later paths that share a
//! prefix re-descend into the nodes the first path created. Siblings are indexed by
//! name for lookup and kept in a separate insertion-ordered list for output.

use crate::error::TreeError;
use crate::tree::node::{Node, NodeKind};
use crate::tree::path;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, instrument, trace};

/// Extension that marks a leaf segment as a file in flat listings
pub const DEFAULT_FILE_EXTENSION: &str = ".lua";

const ROOT: usize = 0;

#[derive(Debug)]
struct Slot {
    name: String,
    kind: NodeKind,
    /// Insertion-ordered child slot ids
    children: Vec<usize>,
    /// Child name -> slot id
    index: HashMap<String, usize>,
}

impl Slot {
    fn new(name: String, kind: NodeKind) -> Self {
        Self {
            name,
            kind,
            children: Vec::new(),
            index: HashMap::new(),
        }
    }
}

/// In-progress tree, threaded through insertion and consumed by [`BuildContext::into_tree`]
#[derive(Debug)]
pub struct BuildContext {
    slots: Vec<Slot>,
    extension: String,
    inserted: usize,
}

impl BuildContext {
    /// Start an empty tree whose root directory is named `root_name`
    pub fn new(root_name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            slots: vec![Slot::new(root_name.into(), NodeKind::Directory)],
            extension: extension.into(),
            inserted: 0,
        }
    }

    /// Insert one slash-separated path relative to the root
    ///
    /// Empty paths are ignored. Re-inserting a known path is a no-op.
    pub fn insert(&mut self, raw_path: &str) -> Result<(), TreeError> {
        let normalized = path::normalize_path_string(raw_path);
        let segments: Vec<&str> = path::segments(&normalized).collect();
        if segments.is_empty() {
            return Ok(());
        }

        let mut current = ROOT;
        for (i, segment) in segments.iter().enumerate() {
            let is_last = i + 1 == segments.len();

            let id = match self.slots[current].index.get(*segment) {
                Some(&id) => id,
                None => {
                    let kind = self.classify(segment, is_last);
                    trace!(segment, ?kind, "Creating node");
                    self.push_child(current, segment, kind)
                }
            };

            match self.slots[id].kind {
                NodeKind::Directory => current = id,
                NodeKind::File if !is_last => {
                    return Err(TreeError::StructuralConflict {
                        path: normalized.clone(),
                        segment: (*segment).to_string(),
                    });
                }
                NodeKind::File => {}
            }
        }

        self.inserted += 1;
        Ok(())
    }

    /// Number of nodes created so far, root included
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: the root exists from construction
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of non-empty paths accepted by [`BuildContext::insert`]
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    /// Materialize the nested tree
    pub fn into_tree(mut self) -> Node {
        materialize(&mut self.slots, ROOT)
    }

    fn classify(&self, segment: &str, is_last: bool) -> NodeKind {
        if is_last && segment.ends_with(self.extension.as_str()) {
            NodeKind::File
        } else {
            NodeKind::Directory
        }
    }

    fn push_child(&mut self, parent: usize, name: &str, kind: NodeKind) -> usize {
        let id = self.slots.len();
        self.slots.push(Slot::new(name.to_string(), kind));
        let parent = &mut self.slots[parent];
        parent.children.push(id);
        parent.index.insert(name.to_string(), id);
        id
    }
}

fn materialize(slots: &mut [Slot], id: usize) -> Node {
    let name = std::mem::take(&mut slots[id].name);
    match slots[id].kind {
        NodeKind::File => Node::File { name },
        NodeKind::Directory => {
            let child_ids = std::mem::take(&mut slots[id].children);
            let children = child_ids
                .into_iter()
                .map(|child| materialize(slots, child))
                .collect();
            Node::Directory { name, children }
        }
    }
}

/// Tree builder for flat, slash-separated path listings
#[derive(Debug, Clone)]
pub struct TrieBuilder {
    root_name: String,
    extension: String,
}

impl TrieBuilder {
    /// Create a builder whose root directory is named `root_name`
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root_name: root_name.into(),
            extension: DEFAULT_FILE_EXTENSION.to_string(),
        }
    }

    /// Override the extension that classifies leaf segments as files
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Fresh build context for manual, path-at-a-time insertion
    pub fn context(&self) -> BuildContext {
        BuildContext::new(self.root_name.clone(), self.extension.clone())
    }

    /// Build the nested tree from a sequence of relative paths
    #[instrument(skip(self, paths), fields(root = %self.root_name))]
    pub fn build<I, S>(&self, paths: I) -> Result<Node, TreeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let start = Instant::now();
        debug!("Starting trie build");

        let mut context = self.context();
        for path in paths {
            context.insert(path.as_ref())?;
        }

        info!(
            paths = context.inserted(),
            node_count = context.len(),
            duration_ms = start.elapsed().as_millis(),
            "Trie build completed"
        );
        Ok(context.into_tree())
    }
}
