// Copyright (c) 2025 QuadBloom Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration for the Bloom filter.

use serde::{Deserialize, Serialize};

use crate::data_structures::bloom_filter::error::{BloomFilterError, Result};

/// Bits allocated per expected key when no amplification is given.
pub const DEFAULT_AMPLIFICATION: usize = 6;

/// Number of bit positions probed per key. Fixed by the four hash strategies.
pub const HASH_PROBES: usize = 4;

/// Default expected number of keys.
const DEFAULT_CAPACITY: usize = 100_000;

/// Sizing parameters for a Bloom filter.
///
/// The filter allocates `capacity * amplification` bits. Raising the
/// amplification lowers the false positive rate at the cost of memory; it is
/// the only accuracy knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomFilterConfig {
    /// Expected maximum number of distinct keys (N)
    capacity: usize,

    /// Bits allocated per expected key (X)
    amplification: usize,
}

impl BloomFilterConfig {
    /// Create a new default configuration.
    ///
    /// Default values:
    /// - capacity: 100,000
    /// - amplification: 6
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            amplification: DEFAULT_AMPLIFICATION,
        }
    }

    /// Set the expected maximum number of distinct keys.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the number of bits allocated per expected key.
    pub fn with_amplification(mut self, amplification: usize) -> Self {
        self.amplification = amplification;
        self
    }

    /// Expected maximum number of distinct keys.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bits allocated per expected key.
    pub fn amplification(&self) -> usize {
        self.amplification
    }

    /// Check that the configuration describes a non-empty, addressable bit array.
    pub fn validate(&self) -> Result<()> {
        self.total_bits().map(|_| ())
    }

    /// Total bit count `M = capacity * amplification`.
    ///
    /// Fails if either factor is zero or the product overflows `usize`.
    pub fn total_bits(&self) -> Result<usize> {
        if self.capacity == 0 {
            return Err(BloomFilterError::InvalidConfiguration(
                "capacity must be greater than 0".to_string(),
            ));
        }
        if self.amplification == 0 {
            return Err(BloomFilterError::InvalidConfiguration(
                "amplification must be greater than 0".to_string(),
            ));
        }
        self.capacity
            .checked_mul(self.amplification)
            .ok_or(BloomFilterError::BitCountOverflow {
                capacity: self.capacity,
                amplification: self.amplification,
            })
    }

    /// Approximate false positive probability after `inserted` distinct keys.
    ///
    /// Uses p = (1 - e^(-k*n/m))^k with k = 4. Returns 1.0 for an invalid
    /// configuration.
    pub fn expected_false_positive_rate(&self, inserted: usize) -> f64 {
        match self.total_bits() {
            Ok(bits) => false_positive_rate(HASH_PROBES, inserted, bits),
            Err(_) => 1.0,
        }
    }
}

impl Default for BloomFilterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// p = (1 - e^(-k*n/m))^k
pub(crate) fn false_positive_rate(probes: usize, inserted: usize, bits: usize) -> f64 {
    let k = probes as f64;
    let exponent = -k * inserted as f64 / bits as f64;
    (1.0 - exponent.exp()).powf(k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BloomFilterConfig::default();
        assert_eq!(config.capacity(), 100_000);
        assert_eq!(config.amplification(), 6);
        assert_eq!(config.total_bits(), Ok(600_000));
    }

    #[test]
    fn test_config_builder() {
        let config = BloomFilterConfig::new()
            .with_capacity(10)
            .with_amplification(8);

        assert_eq!(config.capacity(), 10);
        assert_eq!(config.amplification(), 8);
        assert_eq!(config.total_bits(), Ok(80));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = BloomFilterConfig::new().with_capacity(0);
        assert_eq!(
            config.validate(),
            Err(BloomFilterError::InvalidConfiguration(
                "capacity must be greater than 0".to_string()
            ))
        );
    }

    #[test]
    fn test_zero_amplification_rejected() {
        let config = BloomFilterConfig::new().with_amplification(0);
        assert!(matches!(
            config.total_bits(),
            Err(BloomFilterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_overflow_rejected() {
        let config = BloomFilterConfig::new()
            .with_capacity(usize::MAX)
            .with_amplification(2);
        assert_eq!(
            config.total_bits(),
            Err(BloomFilterError::BitCountOverflow {
                capacity: usize::MAX,
                amplification: 2,
            })
        );
    }

    #[test]
    fn test_expected_false_positive_rate() {
        let config = BloomFilterConfig::new()
            .with_capacity(100_000)
            .with_amplification(6);

        let expected = (1.0 - (-4.0f64 * 100_000.0 / 600_000.0).exp()).powi(4);
        let actual = config.expected_false_positive_rate(100_000);
        assert!((actual - expected).abs() < 1e-12);
        assert!(actual > 0.05 && actual < 0.06);

        assert_eq!(config.expected_false_positive_rate(0), 0.0);
    }

    #[test]
    fn test_more_amplification_lowers_rate() {
        let narrow = BloomFilterConfig::new().with_amplification(6);
        let wide = BloomFilterConfig::new().with_amplification(12);
        assert!(
            wide.expected_false_positive_rate(100_000) < narrow.expected_false_positive_rate(100_000)
        );
    }

    #[test]
    fn test_invalid_config_rate_is_one() {
        let config = BloomFilterConfig::new().with_capacity(0);
        assert_eq!(config.expected_false_positive_rate(10), 1.0);
    }
}
