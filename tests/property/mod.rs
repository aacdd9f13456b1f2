//! Property-based tests for tree construction and rendering

mod flat_ordering;
mod tree_roundtrip;
