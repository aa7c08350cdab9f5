//! CLI parse: clap types for foldtree. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Foldtree CLI - persistent fold state for document section trees
#[derive(Parser)]
#[command(name = "foldtree")]
#[command(about = "Inspect and edit persisted fold state of document section trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Fold the node at a path
    Fold {
        #[arg(required = true, value_name = "SEGMENT")]
        path: Vec<String>,
    },
    /// Unfold the node at a path
    Unfold {
        #[arg(required = true, value_name = "SEGMENT")]
        path: Vec<String>,
    },
    /// Flip the fold state of the node at a path
    Toggle {
        #[arg(required = true, value_name = "SEGMENT")]
        path: Vec<String>,
    },
    /// Flip every node matched by a wildcard path (use '*' as a segment)
    ToggleAll {
        #[arg(required = true, value_name = "SEGMENT")]
        path: Vec<String>,
    },
    /// Print whether the node at a path is folded
    IsFolded {
        #[arg(required = true, value_name = "SEGMENT")]
        path: Vec<String>,
    },
    /// Print the aggregate check over a path ending in '*'
    IsAllFolded {
        #[arg(required = true, value_name = "SEGMENT")]
        path: Vec<String>,
    },
    /// Print the fold tree
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Overwrite persisted fold state with the default tree
    Reset,
    /// Print the effective configuration as TOML
    Config,
}
