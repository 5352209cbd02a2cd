//! Environment variable source: CARTOGRAPHER_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "CARTOGRAPHER";

/// Add environment variable overlay to builder.
/// `CARTOGRAPHER__IDENTITY__ROLE=readonly` sets `identity.role`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
