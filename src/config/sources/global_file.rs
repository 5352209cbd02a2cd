//! Global config file source (optional).

use crate::config::paths;
use config::builder::DefaultState;
use config::{ConfigBuilder, File};

/// Add `$XDG_CONFIG_HOME/cartographer/config.toml` when it can be located.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    match paths::global_config_path() {
        Ok(path) => builder.add_source(File::from(path).required(false)),
        Err(e) => {
            tracing::debug!("No global config location: {}", e);
            builder
        }
    }
}
