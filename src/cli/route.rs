//! CLI route: single route table and run context. Dispatches to the fold state store.

use crate::cli::parse::Commands;
use crate::cli::presentation::{format_tree_json, format_tree_text};
use crate::config::{ConfigLoader, FoldConfig};
use crate::error::{FoldError, StorageError};
use crate::state::FoldTreeStore;
use crate::store::SledKeyValueStore;
use std::path::PathBuf;
use tracing::info;

/// Runtime context for CLI execution: workspace, resolved config, and the store.
pub struct RunContext {
    workspace_root: PathBuf,
    config: FoldConfig,
    store: FoldTreeStore,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, FoldError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Self::with_config(workspace_root, config)
    }

    /// Create run context from an already loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: FoldConfig) -> Result<Self, FoldError> {
        let store_path = config.storage.resolve_path(&workspace_root);
        std::fs::create_dir_all(&store_path).map_err(StorageError::IoError)?;
        let storage = SledKeyValueStore::open(&store_path).map_err(|e| {
            FoldError::MissingDependency(format!(
                "fold state storage unavailable at {}: {}",
                store_path.display(),
                e
            ))
        })?;
        info!(store = %store_path.display(), "Opened fold state storage");

        let store = FoldTreeStore::builder()
            .storage(storage)
            .storage_key(config.storage.key.clone())
            .default_sections(config.tree.default_sections.iter().cloned())
            .build()?;

        Ok(Self {
            workspace_root,
            config,
            store,
        })
    }

    pub fn workspace_root(&self) -> &PathBuf {
        &self.workspace_root
    }

    pub fn store(&self) -> &FoldTreeStore {
        &self.store
    }

    /// Execute a command and return its stdout text.
    pub fn execute(&mut self, command: &Commands) -> Result<String, FoldError> {
        match command {
            Commands::Fold { path } => {
                self.store.fold(path)?;
                Ok(String::new())
            }
            Commands::Unfold { path } => {
                self.store.unfold(path)?;
                Ok(String::new())
            }
            Commands::Toggle { path } => Ok(self.store.toggle_fold(path)?.to_string()),
            Commands::ToggleAll { path } => {
                let flipped = self.store.toggle_fold_all(path)?;
                Ok(format!("toggled {} node(s)", flipped))
            }
            Commands::IsFolded { path } => Ok(self.store.is_folded(path)?.to_string()),
            Commands::IsAllFolded { path } => Ok(self.store.is_all_folded(path)?.to_string()),
            Commands::Show { format } => match format.as_str() {
                "json" => format_tree_json(self.store.tree()),
                "text" => Ok(format_tree_text(self.store.tree())),
                other => Err(FoldError::InvalidArgument(format!(
                    "Unknown output format '{}' (expected 'text' or 'json')",
                    other
                ))),
            },
            Commands::Reset => {
                self.store.reset()?;
                self.store.reload();
                Ok("fold state reset".to_string())
            }
            Commands::Config => toml::to_string_pretty(&self.config)
                .map_err(|e| FoldError::ConfigError(format!("Failed to render config: {}", e))),
        }
    }
}
