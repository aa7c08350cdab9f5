//! Configuration System
//!
//! Layered configuration for the fold state store: built-in defaults, then the
//! user-level file, then workspace files, then `FOLDTREE__*` environment
//! variables.

use crate::error::FoldError;
use crate::logging::LoggingConfig;
use crate::state::DEFAULT_SECTIONS;
use crate::store::FOLD_STATE_KEY;
use crate::tree::{MARKER_KEY, WILDCARD};
use config::{Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge;
mod sources;

pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoldConfig {
    /// Where fold state is persisted
    #[serde(default)]
    pub storage: StorageConfig,

    /// Shape of a fresh tree
    #[serde(default)]
    pub tree: TreeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Persistence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Sled database directory; relative paths resolve against the workspace root
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Key holding the serialized tree
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".foldtree/store")
}

fn default_storage_key() -> String {
    FOLD_STATE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            key: default_storage_key(),
        }
    }
}

impl StorageConfig {
    /// Absolute store path for `workspace_root`.
    pub fn resolve_path(&self, workspace_root: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            workspace_root.join(&self.path)
        }
    }
}

/// Tree settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Root sections of the default tree
    #[serde(default = "default_sections")]
    pub default_sections: Vec<String>,
}

fn default_sections() -> Vec<String> {
    DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            default_sections: default_sections(),
        }
    }
}

impl FoldConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.storage.key.trim().is_empty() {
            errors.push("storage.key cannot be empty".to_string());
        }
        if self.storage.path.as_os_str().is_empty() {
            errors.push("storage.path cannot be empty".to_string());
        }

        if self.tree.default_sections.is_empty() {
            errors.push("tree.default_sections must name at least one section".to_string());
        }
        for section in &self.tree.default_sections {
            if section == WILDCARD || section == MARKER_KEY {
                errors.push(format!(
                    "tree.default_sections contains reserved name '{}'",
                    section
                ));
            }
        }

        if let Err(e) = crate::logging::validate_format(&self.logging.format) {
            errors.push(e.to_string());
        }
        if let Err(e) = crate::logging::validate_output(&self.logging.output) {
            errors.push(e.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads [`FoldConfig`] from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    pub fn load(workspace_root: &Path) -> Result<FoldConfig, FoldError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = builder.add_source(Environment::with_prefix("FOLDTREE").separator("__"));
        Self::finish(builder.build()?)
    }

    /// Load configuration from one explicit file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<FoldConfig, FoldError> {
        let builder = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        Self::finish(builder.build()?)
    }

    fn finish(raw: config::Config) -> Result<FoldConfig, FoldError> {
        let config: FoldConfig = raw.try_deserialize()?;
        config.validate().map_err(|errors| {
            FoldError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            ))
        })?;
        Ok(config)
    }
}
