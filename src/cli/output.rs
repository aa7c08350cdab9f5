//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::FoldError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &FoldError) -> String {
    match e {
        FoldError::InvalidArgument(_) | FoldError::InvalidUsage(_) => format!(
            "{}\nPaths are given as separate segments, e.g. `paths /pets get` or `paths '*'`.",
            e
        ),
        other => other.to_string(),
    }
}
