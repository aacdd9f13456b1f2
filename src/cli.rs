//! CLI domain: parse, route, output, and presentation only.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, SourceArgs};
pub use presentation::{format_build_summary, format_download_summary};
pub use route::RunContext;
