//! Harness configuration module.
//!
//! Key populations used when measuring false positive rates.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Prefix of the keys inserted into the filter during measurement.
pub const DEFAULT_INSERTED_PREFIX: &str =
    "https://www.cnblogs.com/-clq/archive/2012/05/31/2528153.html";

/// Prefix of the unrelated query keys.
pub const DEFAULT_UNRELATED_PREFIX: &str = "zhihu.com";

/// Suffix offset of the similar query keys.
pub const DEFAULT_SIMILAR_OFFSET: u64 = 999_999;

/// Measurement harness configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Inserted keys are `inserted_prefix + i`
    pub inserted_prefix: String,

    /// Unrelated query keys are `unrelated_prefix + (i + r)` for a random `r`
    pub unrelated_prefix: String,

    /// Similar query keys are `inserted_prefix + (similar_offset + i)`
    pub similar_offset: u64,

    /// Seed for the random suffixes. A fresh seed is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            inserted_prefix: DEFAULT_INSERTED_PREFIX.to_string(),
            unrelated_prefix: DEFAULT_UNRELATED_PREFIX.to_string(),
            similar_offset: DEFAULT_SIMILAR_OFFSET,
            seed: None,
        }
    }
}

impl Validate for HarnessConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.inserted_prefix.is_empty() {
            return Err(ConfigError::ValidationError(
                "inserted_prefix must not be empty".to_string(),
            ));
        }

        if self.unrelated_prefix.is_empty() {
            return Err(ConfigError::ValidationError(
                "unrelated_prefix must not be empty".to_string(),
            ));
        }

        // Either prefix extending the other could make unrelated keys collide
        // with inserted ones.
        if self.inserted_prefix.starts_with(&self.unrelated_prefix)
            || self.unrelated_prefix.starts_with(&self.inserted_prefix)
        {
            return Err(ConfigError::ValidationError(
                "inserted_prefix and unrelated_prefix must not be prefixes of each other"
                    .to_string(),
            ));
        }

        Ok(())
    }
}
