//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; a single route table dispatches to the store.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_tree_json, format_tree_text};
pub use route::RunContext;
