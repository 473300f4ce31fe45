// Copyright (c) 2025 QuadBloom Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Integration tests for the Bloom filter and the measurement harness.

use rand::rngs::StdRng;
use rand::SeedableRng;

use quadbloom_lib::config::{HarnessConfig, QuadBloomConfig};
use quadbloom_lib::data_structures::bloom_filter::{
    BloomFilter, BloomFilterConfig, BloomFilterError, DEFAULT_AMPLIFICATION,
};
use quadbloom_lib::error::QuadBloomError;
use quadbloom_lib::harness::{self, SAMPLE_KEYS};

#[test]
fn test_small_filter_finds_all_samples() {
    // 10 keys * 6 bits = 60 bits, nine short multi-byte keys
    let mut filter = BloomFilter::new(10, DEFAULT_AMPLIFICATION).unwrap();
    assert_eq!(filter.bit_count(), 60);

    for key in SAMPLE_KEYS {
        filter.insert(key);
    }

    for key in SAMPLE_KEYS {
        assert!(filter.query(key), "{key} should be present");
    }
}

#[test]
fn test_zero_configuration_rejected() {
    assert!(matches!(
        BloomFilter::<str>::new(0, 6),
        Err(BloomFilterError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        BloomFilter::<str>::new(100, 0),
        Err(BloomFilterError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        BloomFilter::<str>::new(0, 0),
        Err(BloomFilterError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_demo_with_seed() {
    let mut rng = StdRng::seed_from_u64(2024);
    let config = BloomFilterConfig::new().with_capacity(10);
    let demo = harness::run_membership_demo(config, &mut rng).unwrap();

    assert!(demo.all_inserted_found());
    assert_eq!(demo.perturbed.len(), 9);
}

#[test]
fn test_false_positive_rates_track_theory() {
    // 100,000 keys in 600,000 bits
    let config = QuadBloomConfig {
        filter: BloomFilterConfig::new()
            .with_capacity(100_000)
            .with_amplification(6),
        harness: HarnessConfig {
            seed: Some(20_240_531),
            ..HarnessConfig::default()
        },
        ..QuadBloomConfig::default()
    };

    let report = harness::measure_false_positives(&config).unwrap();
    println!("{report}");

    assert_eq!(report.missed_inserted, 0, "inserted keys must never be missed");

    // (1 - e^(-4/6))^4 ~= 0.056
    let theory = report.theoretical_rate;
    assert!(theory > 0.05 && theory < 0.06);

    for (name, rate) in [
        ("similar", report.similar_rate),
        ("unrelated", report.unrelated_rate),
    ] {
        assert!(
            rate > theory * 0.5 && rate < theory * 1.5,
            "{name} rate {rate:.4} too far from theoretical {theory:.4}"
        );
    }

    // Lexical similarity to inserted keys must not change the rate noticeably
    assert!(
        report.rate_gap() < 0.01,
        "similar {:.4} vs unrelated {:.4}",
        report.similar_rate,
        report.unrelated_rate
    );
}

#[test]
fn test_more_bits_fewer_false_positives() {
    let measure = |amplification: usize| {
        let config = QuadBloomConfig {
            filter: BloomFilterConfig::new()
                .with_capacity(20_000)
                .with_amplification(amplification),
            harness: HarnessConfig {
                seed: Some(5),
                ..HarnessConfig::default()
            },
            ..QuadBloomConfig::default()
        };
        harness::measure_false_positives(&config).unwrap()
    };

    let narrow = measure(4);
    let wide = measure(16);
    assert!(wide.similar_rate < narrow.similar_rate);
    assert!(wide.unrelated_rate < narrow.unrelated_rate);
}

#[test]
fn test_measure_rejects_overlapping_similar_keys() {
    let config = QuadBloomConfig {
        filter: BloomFilterConfig::new().with_capacity(1_000),
        harness: HarnessConfig {
            similar_offset: 10,
            ..HarnessConfig::default()
        },
        ..QuadBloomConfig::default()
    };

    assert!(matches!(
        harness::measure_false_positives(&config),
        Err(QuadBloomError::Config(_))
    ));
}
