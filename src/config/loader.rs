//! Configuration Loader
//!
//! Layers built-in defaults, an optional TOML file and prefixed environment
//! variables into a validated [`ManagementConfig`].

use super::error::ConfigResult;
use super::ManagementConfig;
use crate::constants::system::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_FILE,
};
use ::config::{Config, Environment, File};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    environment: Option<::config::Map<String, String>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit configuration file, which must then exist.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Read environment overrides from the given map instead of the process
    /// environment. Keys use the same `CLUSTER_MGMT__SECTION__FIELD` form.
    pub fn with_environment<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = Some(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    pub fn load(&self) -> ConfigResult<ManagementConfig> {
        let environment_name = detect_environment();
        debug!(
            environment = %environment_name,
            file = ?self.file,
            "Loading management configuration"
        );

        let defaults = Config::try_from(&ManagementConfig::default())?;
        let mut builder = Config::builder().add_source(defaults);

        builder = match &self.file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let mut environment = Environment::with_prefix(CONFIG_ENV_PREFIX)
            .separator(CONFIG_ENV_SEPARATOR)
            .try_parsing(true);
        if let Some(vars) = &self.environment {
            environment = environment.source(Some(vars.clone()));
        }

        let config: ManagementConfig = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        config.validate()?;

        debug!(
            cluster_group = %config.cluster_group,
            persistence_enabled = config.persistence.enabled,
            member_timeout_ms = config.invocation.member_timeout_ms,
            "Management configuration loaded"
        );

        Ok(config)
    }
}

/// Current deployment environment name.
pub fn detect_environment() -> String {
    std::env::var("CLUSTER_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PersistenceBackend;
    use std::io::Write;

    #[test]
    fn loads_defaults_without_sources() {
        let config = ConfigLoader::new()
            .with_environment(Vec::<(String, String)>::new())
            .load()
            .unwrap();
        assert_eq!(config, ManagementConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "cluster_group = \"east\"\n\n[persistence]\nbackend = \"file\"\ndirectory = \"/tmp/east\"\n\n[invocation]\nmember_timeout_ms = 750"
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_file(file.path())
            .with_environment(Vec::<(String, String)>::new())
            .load()
            .unwrap();

        assert_eq!(config.cluster_group, "east");
        assert_eq!(config.persistence.backend, PersistenceBackend::File);
        assert_eq!(config.invocation.member_timeout_ms, 750);
        assert!(config.persistence.enabled);
    }

    #[test]
    fn environment_overrides_file() {
        let config = ConfigLoader::new()
            .with_environment([
                ("CLUSTER_MGMT__INVOCATION__MEMBER_TIMEOUT_MS", "2500"),
                ("CLUSTER_MGMT__PERSISTENCE__ENABLED", "false"),
            ])
            .load()
            .unwrap();

        assert_eq!(config.invocation.member_timeout_ms, 2500);
        assert!(!config.persistence.enabled);
    }

    #[test]
    fn invalid_values_are_rejected_after_layering() {
        let result = ConfigLoader::new()
            .with_environment([("CLUSTER_MGMT__INVOCATION__MEMBER_TIMEOUT_MS", "0")])
            .load();
        assert!(result.is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = ConfigLoader::new()
            .with_file("/definitely/not/here/cluster.toml")
            .with_environment(Vec::<(String, String)>::new())
            .load();
        assert!(result.is_err());
    }
}
