//! Configuration module for QuadBloom.
//!
//! This module provides a configuration system that can load settings
//! from files (TOML, YAML, JSON) and override them with environment variables.
//! All configuration values are validated for correctness before use.

use std::path::{Path, PathBuf};

use crate::data_structures::bloom_filter::BloomFilterConfig;
use crate::error::config::ConfigError;
use config::{Config, ConfigError as ExternalConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

pub mod harness;

pub use harness::HarnessConfig;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default configuration location
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "QUADBLOOM";

/// A trait for types that can be validated.
pub trait Validate {
    /// Validates that the configuration is correct.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the configuration is valid
    /// * `Err(ConfigError)` if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Main configuration for QuadBloom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QuadBloomConfig {
    /// Filter sizing
    pub filter: BloomFilterConfig,

    /// Measurement harness settings
    pub harness: HarnessConfig,

    /// Log configuration
    pub log: LogConfig,
}

/// Command line overrides for a measurement run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeasureOverrides {
    /// Replaces `filter.capacity`
    pub capacity: Option<usize>,
    /// Replaces `filter.amplification`
    pub amplification: Option<usize>,
    /// Replaces `harness.similar_offset`
    pub similar_offset: Option<u64>,
    /// Replaces `harness.seed`
    pub seed: Option<u64>,
}

impl QuadBloomConfig {
    /// Apply measurement overrides.
    ///
    /// A capacity override without an explicit similar offset lifts the
    /// offset to the new capacity when it would otherwise fall inside the
    /// inserted range.
    pub fn with_overrides(mut self, overrides: MeasureOverrides) -> Self {
        if let Some(capacity) = overrides.capacity {
            self.filter = self.filter.with_capacity(capacity);
        }
        if let Some(amplification) = overrides.amplification {
            self.filter = self.filter.with_amplification(amplification);
        }
        if overrides.seed.is_some() {
            self.harness.seed = overrides.seed;
        }

        match overrides.similar_offset {
            Some(offset) => self.harness.similar_offset = offset,
            None if overrides.capacity.is_some() => {
                let capacity = self.filter.capacity() as u64;
                if self.harness.similar_offset < capacity {
                    tracing::info!(
                        from = self.harness.similar_offset,
                        to = capacity,
                        "Raising similar key offset past the inserted range"
                    );
                    self.harness.similar_offset = capacity;
                }
            }
            None => {}
        }

        self
    }
}

impl Validate for QuadBloomConfig {
    fn validate(&self) -> ConfigResult<()> {
        Validate::validate(&self.filter)?;
        self.harness.validate()?;
        self.log.validate()?;

        // Similar keys must not reuse a suffix of an inserted key.
        let capacity = self.filter.capacity() as u64;
        if self.harness.similar_offset < capacity {
            return Err(ConfigError::ValidationError(format!(
                "harness.similar_offset ({}) must be at least filter.capacity ({capacity})",
                self.harness.similar_offset
            )));
        }
        if self.harness.similar_offset.checked_add(capacity).is_none() {
            return Err(ConfigError::ValidationError(
                "harness.similar_offset + filter.capacity overflows u64".to_string(),
            ));
        }

        Ok(())
    }
}

impl Validate for BloomFilterConfig {
    fn validate(&self) -> ConfigResult<()> {
        BloomFilterConfig::validate(self)
            .map_err(|e| ConfigError::ValidationError(format!("filter: {e}")))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Whether to log in JSON format
    pub json: bool,

    /// Whether to include source code locations in logs
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            source_location: true,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}",
                self.level
            ))),
        }
    }
}

/// Configuration loader for QuadBloom.
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to the configuration file
    /// * `env_prefix` - Prefix for environment variables that override configuration values
    pub fn new<P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Loads the configuration from defaults, the file, and environment variables,
    /// in increasing order of precedence.
    pub fn load(&self) -> ConfigResult<QuadBloomConfig> {
        let mut builder = Config::builder();

        builder = builder.add_source(
            Config::try_from(&QuadBloomConfig::default())
                .map_err(|e| ConfigError::LoadError(e.to_string()))?,
        );

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }

            let format = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => FileFormat::Toml,
                Some("json") => FileFormat::Json,
                Some("yaml" | "yml") => FileFormat::Yaml,
                _ => {
                    return Err(ConfigError::ParseError(format!(
                        "Unsupported file extension for: {path:?}"
                    )))
                }
            };
            builder = builder.add_source(File::from(path.as_path()).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(|e| match e {
            ExternalConfigError::NotFound(path) => ConfigError::FileNotFound(PathBuf::from(path)),
            ExternalConfigError::FileParse { uri, cause } => ConfigError::ParseError(format!(
                "Error parsing config file {}: {cause}",
                uri.unwrap_or_default()
            )),
            other => ConfigError::LoadError(other.to_string()),
        })?;

        let quadbloom_config: QuadBloomConfig = config
            .try_deserialize()
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;

        quadbloom_config.validate()?;

        tracing::debug!(config = ?quadbloom_config, "Configuration loaded");
        Ok(quadbloom_config)
    }
}
