//! Manifest tree
//!
//! Represents a source-asset tree as nested file/directory nodes, built either from
//! a flat path listing or from a live directory.

pub mod builder;
pub mod descent;
pub mod flatten;
pub mod node;
pub mod path;
pub mod walker;

pub use builder::{BuildContext, TrieBuilder};
pub use descent::DescentBuilder;
pub use node::{Node, NodeKind};
