//! MergeService: orchestrates sources, applies merge policy, deserializes to CartographerConfig.

use crate::config::sources::{environment, global_file};
use crate::config::CartographerConfig;
use config::ConfigError;
use config::File;
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<CartographerConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder);
        let builder = environment::add_to_builder(builder);

        builder.build()?.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    /// The global file is skipped: an explicit file replaces it.
    pub fn load_from_file(path: &Path) -> Result<CartographerConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path));
        let builder = environment::add_to_builder(builder);

        builder.build()?.try_deserialize()
    }
}
