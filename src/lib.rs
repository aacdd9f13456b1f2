//! Filelist: fetchable manifests of source-asset trees
//!
//! Describes the layout of a repository subtree as a JSON manifest, either as a
//! nested file/directory tree or as a flat path list, so that a consumer can fetch
//! individual files from a content-delivery URL without cloning the repository.

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod source;
pub mod tree;
