//! Measurement harness for the Bloom filter.
//!
//! Drives a filter through its public `insert`/`query` operations to observe
//! behaviour: a small membership demonstration and a large-scale empirical
//! false positive measurement comparing near-duplicate and unrelated keys.
//! Randomness lives here only; the filter and its hash strategies never see it.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{QuadBloomConfig, Validate};
use crate::data_structures::bloom_filter::{self, BloomFilter, BloomFilterConfig};
use crate::error::QuadBloomResult;

/// Short keys used by the membership demonstration.
pub const SAMPLE_KEYS: [&str; 9] = [
    "猪八戒",
    "孙悟空",
    "沙悟净",
    "唐三藏",
    "白龙马1",
    "1白龙马",
    "白1龙马",
    "白11龙马",
    "1白龙马1",
];

/// Upper bound of the random suffix added to unrelated and perturbed keys.
const RANDOM_SUFFIX_MAX: u32 = i32::MAX as u32;

/// Outcome of querying one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipCheck {
    /// The queried key
    pub key: String,
    /// What the filter answered
    pub possibly_present: bool,
}

/// Results of the small-scale membership demonstration.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipDemo {
    /// Total bits in the demo filter
    pub bit_count: usize,
    /// Each sample key queried after inserting all of them
    pub inserted: Vec<MembershipCheck>,
    /// Each sample key with a random numeric suffix, never inserted
    pub perturbed: Vec<MembershipCheck>,
}

impl MembershipDemo {
    /// True if every inserted key was reported as possibly present.
    pub fn all_inserted_found(&self) -> bool {
        self.inserted.iter().all(|check| check.possibly_present)
    }
}

/// Insert [`SAMPLE_KEYS`] into a filter built from `config`, then query them and
/// randomly suffixed variants.
pub fn run_membership_demo<R: Rng>(
    config: BloomFilterConfig,
    rng: &mut R,
) -> bloom_filter::Result<MembershipDemo> {
    let mut filter = BloomFilter::with_config(config)?;
    for key in SAMPLE_KEYS {
        filter.insert(key);
    }

    let inserted = SAMPLE_KEYS
        .iter()
        .map(|&key| MembershipCheck {
            key: key.to_string(),
            possibly_present: filter.query(key),
        })
        .collect();

    let perturbed = SAMPLE_KEYS
        .iter()
        .map(|&key| {
            let key = format!("{key}{}", rng.random_range(0..=RANDOM_SUFFIX_MAX));
            let possibly_present = filter.query(key.as_str());
            MembershipCheck {
                key,
                possibly_present,
            }
        })
        .collect();

    Ok(MembershipDemo {
        bit_count: filter.bit_count(),
        inserted,
        perturbed,
    })
}

/// Empirical false positive measurement.
#[derive(Debug, Clone, Serialize)]
pub struct FalsePositiveReport {
    /// Filter capacity (N), also the size of each key population
    pub capacity: usize,
    /// Bits per expected key (X)
    pub amplification: usize,
    /// Total bits (M)
    pub bit_count: usize,
    /// Seed used for random suffixes
    pub seed: u64,
    /// Inserted keys that queried absent. Always zero for a correct filter.
    pub missed_inserted: usize,
    /// Similar keys reported present
    pub similar_false_positives: usize,
    /// `similar_false_positives / capacity`
    pub similar_rate: f64,
    /// Unrelated keys reported present
    pub unrelated_false_positives: usize,
    /// `unrelated_false_positives / capacity`
    pub unrelated_rate: f64,
    /// (1 - e^(-4n/M))^4 with n = capacity
    pub theoretical_rate: f64,
    /// Fraction of bits set after all insertions
    pub fill_ratio: f64,
}

impl FalsePositiveReport {
    /// Absolute difference between the similar and unrelated rates.
    pub fn rate_gap(&self) -> f64 {
        (self.similar_rate - self.unrelated_rate).abs()
    }
}

impl fmt::Display for FalsePositiveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "filter: N={} X={} M={} (seed {})",
            self.capacity, self.amplification, self.bit_count, self.seed
        )?;
        writeln!(f, "missed inserted keys:       {}", self.missed_inserted)?;
        writeln!(
            f,
            "similar key FP rate:        {:.6} ({}/{})",
            self.similar_rate, self.similar_false_positives, self.capacity
        )?;
        writeln!(
            f,
            "unrelated key FP rate:      {:.6} ({}/{})",
            self.unrelated_rate, self.unrelated_false_positives, self.capacity
        )?;
        writeln!(f, "theoretical FP rate:        {:.6}", self.theoretical_rate)?;
        write!(f, "fill ratio:                 {:.6}", self.fill_ratio)
    }
}

/// Insert `capacity` keys and measure how often never-inserted keys are
/// reported present.
///
/// Inserted keys are `inserted_prefix + i`, similar keys
/// `inserted_prefix + (similar_offset + i)` and unrelated keys
/// `unrelated_prefix + (i + r)` with a random `r`, for `i` in `0..capacity`.
pub fn measure_false_positives(config: &QuadBloomConfig) -> QuadBloomResult<FalsePositiveReport> {
    config.validate()?;

    let harness = &config.harness;
    let capacity = config.filter.capacity();
    let seed = harness.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);

    info!(
        capacity,
        amplification = config.filter.amplification(),
        seed,
        "Measuring false positive rates"
    );

    let mut bloom = BloomFilter::<str>::with_config(config.filter)?;
    for i in 0..capacity {
        bloom.insert(&format!("{}{i}", harness.inserted_prefix));
    }
    debug!(fill_ratio = bloom.fill_ratio(), "Insertion finished");

    let missed_inserted = (0..capacity)
        .filter(|i| !bloom.query(&format!("{}{i}", harness.inserted_prefix)))
        .count();

    let similar_false_positives = (0..capacity as u64)
        .filter(|i| {
            bloom.query(&format!("{}{}", harness.inserted_prefix, harness.similar_offset + i))
        })
        .count();

    let unrelated_false_positives = (0..capacity as u64)
        .filter(|i| {
            let suffix = i + u64::from(rng.random_range(0..=RANDOM_SUFFIX_MAX));
            bloom.query(&format!("{}{suffix}", harness.unrelated_prefix))
        })
        .count();

    let report = FalsePositiveReport {
        capacity,
        amplification: config.filter.amplification(),
        bit_count: bloom.bit_count(),
        seed,
        missed_inserted,
        similar_false_positives,
        similar_rate: similar_false_positives as f64 / capacity as f64,
        unrelated_false_positives,
        unrelated_rate: unrelated_false_positives as f64 / capacity as f64,
        theoretical_rate: config.filter.expected_false_positive_rate(capacity),
        fill_ratio: bloom.fill_ratio(),
    };

    info!(
        similar_rate = report.similar_rate,
        unrelated_rate = report.unrelated_rate,
        theoretical_rate = report.theoretical_rate,
        "Measurement finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HarnessConfig;
    use crate::error::QuadBloomError;

    fn small_config(capacity: usize, seed: u64) -> QuadBloomConfig {
        QuadBloomConfig {
            filter: BloomFilterConfig::new()
                .with_capacity(capacity)
                .with_amplification(6),
            harness: HarnessConfig {
                seed: Some(seed),
                ..HarnessConfig::default()
            },
            ..QuadBloomConfig::default()
        }
    }

    #[test]
    fn test_membership_demo_finds_all_samples() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = BloomFilterConfig::new().with_capacity(10).with_amplification(6);
        let demo = run_membership_demo(config, &mut rng).unwrap();

        assert_eq!(demo.bit_count, 60);
        assert_eq!(demo.inserted.len(), SAMPLE_KEYS.len());
        assert!(demo.all_inserted_found());
        assert_eq!(demo.perturbed.len(), SAMPLE_KEYS.len());
        for (check, sample) in demo.perturbed.iter().zip(SAMPLE_KEYS) {
            assert!(check.key.starts_with(sample));
            assert_ne!(check.key, sample);
        }
    }

    #[test]
    fn test_membership_demo_rejects_zero_capacity() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = BloomFilterConfig::new().with_capacity(0);
        assert!(run_membership_demo(config, &mut rng).is_err());
    }

    #[test]
    fn test_measure_small_filter() {
        let report = measure_false_positives(&small_config(2_000, 42)).unwrap();

        assert_eq!(report.capacity, 2_000);
        assert_eq!(report.bit_count, 12_000);
        assert_eq!(report.seed, 42);
        assert_eq!(report.missed_inserted, 0);
        assert!(report.similar_rate < 0.2);
        assert!(report.unrelated_rate < 0.2);
        assert!(report.fill_ratio > 0.0 && report.fill_ratio < 1.0);
    }

    #[test]
    fn test_measure_is_reproducible_with_seed() {
        let first = measure_false_positives(&small_config(1_000, 9)).unwrap();
        let second = measure_false_positives(&small_config(1_000, 9)).unwrap();
        assert_eq!(first.unrelated_false_positives, second.unrelated_false_positives);
        assert_eq!(first.similar_false_positives, second.similar_false_positives);
    }

    #[test]
    fn test_measure_rejects_invalid_config() {
        let config = small_config(0, 1);
        assert!(matches!(
            measure_false_positives(&config),
            Err(QuadBloomError::Config(_))
        ));
    }

    #[test]
    fn test_report_display() {
        let report = measure_false_positives(&small_config(100, 3)).unwrap();
        let rendered = report.to_string();
        assert!(rendered.contains("N=100 X=6 M=600"));
        assert!(rendered.contains("theoretical FP rate"));
    }
}
