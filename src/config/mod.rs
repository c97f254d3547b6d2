//! # Management Configuration
//!
//! Typed configuration for the management service, loaded by [`ConfigLoader`]
//! from built-in defaults, an optional TOML file and `CLUSTER_MGMT__*`
//! environment variables (later sources win).
//!
//! ```toml
//! cluster_group = "cluster"
//!
//! [persistence]
//! enabled = true
//! backend = "file"
//! directory = "cluster_config"
//!
//! [invocation]
//! member_timeout_ms = 5000
//!
//! [logging]
//! json = false
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cluster_config::config::ConfigLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new().load()?;
//! let timeout = config.invocation.member_timeout();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::constants::{system, DEFAULT_CLUSTER_GROUP};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigLoader;

/// Root configuration of the management service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagementConfig {
    /// Group used when a request does not name one; targets every member
    pub cluster_group: String,
    pub persistence: PersistenceConfig,
    pub invocation: InvocationConfig,
    pub logging: LoggingConfig,
}

impl Default for ManagementConfig {
    fn default() -> Self {
        Self {
            cluster_group: DEFAULT_CLUSTER_GROUP.to_string(),
            persistence: PersistenceConfig::default(),
            invocation: InvocationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ManagementConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.cluster_group.trim().is_empty() {
            return Err(ConfigurationError::invalid_value(
                "cluster_group",
                &self.cluster_group,
                "cluster group name must not be empty",
            ));
        }

        if self.invocation.member_timeout_ms == 0 {
            return Err(ConfigurationError::invalid_value(
                "invocation.member_timeout_ms",
                self.invocation.member_timeout_ms,
                "member invocations need a bounded, non-zero timeout",
            ));
        }

        if self.persistence.enabled
            && self.persistence.backend == PersistenceBackend::File
            && self.persistence.directory.as_os_str().is_empty()
        {
            return Err(ConfigurationError::invalid_value(
                "persistence.directory",
                "",
                "the file backend requires a directory",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceBackend {
    Memory,
    File,
}

/// Cluster configuration persistence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// When false every result reports persistence as NOT_APPLICABLE
    pub enabled: bool,
    pub backend: PersistenceBackend,
    pub directory: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: PersistenceBackend::Memory,
            directory: PathBuf::from(system::DEFAULT_PERSISTENCE_DIRECTORY),
        }
    }
}

/// Member fan-out settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvocationConfig {
    pub member_timeout_ms: u64,
}

impl Default for InvocationConfig {
    fn default() -> Self {
        Self {
            member_timeout_ms: system::DEFAULT_MEMBER_TIMEOUT_MS,
        }
    }
}

impl InvocationConfig {
    pub fn member_timeout(&self) -> Duration {
        Duration::from_millis(self.member_timeout_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive; falls back to RUST_LOG, then the environment default
    pub level: Option<String>,
    pub json: bool,
}
