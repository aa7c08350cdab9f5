//! Merge rules: defaults, override order, conflict handling.

use crate::store::FOLD_STATE_KEY;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("storage.path", ".foldtree/store")?
        .set_default("storage.key", FOLD_STATE_KEY)
}
