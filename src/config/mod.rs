//! Configuration
//!
//! Layered configuration via the `config` crate: built-in defaults, the global
//! `config.toml` (or an explicit file), then `CARTOGRAPHER__*` environment variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::access::{Actor, UserRole};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartographerConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

/// Where the network directory database lives
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory database path; `None` uses `$XDG_DATA_HOME/cartographer/directory`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolve_path(&self) -> Result<PathBuf, ApiError> {
        match &self.path {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => paths::default_directory_path(),
        }
    }
}

/// Acting user for CLI operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
}

fn default_user_id() -> String {
    "local".to_string()
}

fn default_role() -> UserRole {
    UserRole::Owner
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            role: default_role(),
        }
    }
}

impl IdentityConfig {
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id.clone(), self.role)
    }
}
