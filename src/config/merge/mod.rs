//! Config composition: defaults, files, environment.

pub mod service;

pub(crate) mod merge_policy {
    use config::builder::DefaultState;
    use config::{ConfigBuilder, ConfigError};

    /// Builder seeded with the lowest-precedence defaults
    pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("identity.user_id", "local")?
            .set_default("identity.role", "owner")?
            .set_default("logging.enabled", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?
            .set_default("logging.output", "stderr")
    }
}
