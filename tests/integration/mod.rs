//! Integration tests for manifest construction

mod git_listing;
mod manifest_output;
mod tree_structure;
mod walk_manifest;
