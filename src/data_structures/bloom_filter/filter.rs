// Copyright (c) 2025 QuadBloom Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Main implementation of the Bloom filter.

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::data_structures::bloom_filter::bits::BitStore;
use crate::data_structures::bloom_filter::config::{
    false_positive_rate, BloomFilterConfig, HASH_PROBES,
};
use crate::data_structures::bloom_filter::error::Result;
use crate::data_structures::bloom_filter::hash::{ApHash, BkdrHash, DjbHash, JsHash, KeyHasher};

/// A four-probe Bloom filter.
///
/// Each key is hashed by four independent strategies; every hash is reduced
/// modulo the total bit count `M = capacity * amplification` to select one bit.
/// Inserting sets the four bits, querying checks them. Bits are never cleared,
/// so a key that was inserted is always reported as possibly present.
///
/// Mutation takes `&mut self`. Sharing a filter between writers therefore
/// requires external synchronization such as a `Mutex`.
///
/// # Type Parameters
///
/// * `K` - The key type. Defaults to `str`.
/// * `H1`..`H4` - The hash strategies, in probe order.
///
/// # Examples
///
/// ```
/// use quadbloom_lib::data_structures::bloom_filter::BloomFilter;
///
/// let mut filter = BloomFilter::new(1_000, 6)?;
/// filter.insert("hello_world");
///
/// assert!(filter.query("hello_world"));
/// # Ok::<(), quadbloom_lib::data_structures::bloom_filter::BloomFilterError>(())
/// ```
pub struct BloomFilter<K: ?Sized = str, H1 = BkdrHash, H2 = ApHash, H3 = DjbHash, H4 = JsHash> {
    /// Sizing parameters
    config: BloomFilterConfig,

    /// Cached `capacity * amplification`
    bit_count: usize,

    /// Backing storage, exactly `bit_count` bits
    bits: BitStore,

    h1: H1,
    h2: H2,
    h3: H3,
    h4: H4,

    /// Number of `insert` calls, duplicates included
    insertions: u64,

    _marker: PhantomData<fn(&K)>,
}

impl<K: AsRef<[u8]> + ?Sized> BloomFilter<K> {
    /// Create a filter sized for `capacity` keys with `amplification` bits per key,
    /// using the default hash strategies.
    pub fn new(capacity: usize, amplification: usize) -> Result<Self> {
        Self::with_config(
            BloomFilterConfig::new()
                .with_capacity(capacity)
                .with_amplification(amplification),
        )
    }

    /// Create a filter from a configuration, using the default hash strategies.
    pub fn with_config(config: BloomFilterConfig) -> Result<Self> {
        Self::with_strategies(config, BkdrHash, ApHash, DjbHash, JsHash)
    }
}

impl<K, H1, H2, H3, H4> BloomFilter<K, H1, H2, H3, H4>
where
    K: ?Sized,
    H1: KeyHasher<K>,
    H2: KeyHasher<K>,
    H3: KeyHasher<K>,
    H4: KeyHasher<K>,
{
    /// Create a filter with explicitly chosen hash strategies.
    ///
    /// Fails if the configuration yields a zero-length or unaddressable bit array.
    pub fn with_strategies(
        config: BloomFilterConfig,
        h1: H1,
        h2: H2,
        h3: H3,
        h4: H4,
    ) -> Result<Self> {
        let bit_count = config.total_bits()?;
        debug!(
            capacity = config.capacity(),
            amplification = config.amplification(),
            bit_count,
            "Allocating Bloom filter"
        );

        Ok(Self {
            config,
            bit_count,
            bits: BitStore::new(bit_count),
            h1,
            h2,
            h3,
            h4,
            insertions: 0,
            _marker: PhantomData,
        })
    }

    /// Insert a key, setting the bit selected by each of the four strategies.
    pub fn insert(&mut self, key: &K) {
        for index in self.probe_indices(key) {
            self.bits.set(index);
        }
        self.insertions = self.insertions.saturating_add(1);
    }

    /// Returns `true` if the key might have been inserted, `false` if it definitely was not.
    ///
    /// Probes in strategy order and stops at the first unset bit.
    pub fn query(&self, key: &K) -> bool {
        self.bits.test(self.reduce(self.h1.hash_key(key)))
            && self.bits.test(self.reduce(self.h2.hash_key(key)))
            && self.bits.test(self.reduce(self.h3.hash_key(key)))
            && self.bits.test(self.reduce(self.h4.hash_key(key)))
    }

    /// The four bit positions a key maps to, in strategy order.
    pub fn probe_indices(&self, key: &K) -> [usize; HASH_PROBES] {
        [
            self.reduce(self.h1.hash_key(key)),
            self.reduce(self.h2.hash_key(key)),
            self.reduce(self.h3.hash_key(key)),
            self.reduce(self.h4.hash_key(key)),
        ]
    }

    /// Approximate false positive probability given the number of inserts so far.
    ///
    /// Duplicate inserts are counted, so this overestimates when keys repeat.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        let inserted = usize::try_from(self.insertions).unwrap_or(usize::MAX);
        false_positive_rate(HASH_PROBES, inserted, self.bit_count)
    }

    #[inline]
    fn reduce(&self, hash: u64) -> usize {
        // The remainder is below bit_count, which is a usize.
        (hash % self.bit_count as u64) as usize
    }
}

impl<K: ?Sized, H1, H2, H3, H4> BloomFilter<K, H1, H2, H3, H4> {
    /// Expected maximum number of distinct keys.
    pub fn capacity(&self) -> usize {
        self.config.capacity()
    }

    /// Bits allocated per expected key.
    pub fn amplification(&self) -> usize {
        self.config.amplification()
    }

    /// Total number of bits, `capacity * amplification`.
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Number of `insert` calls so far.
    pub fn insertions(&self) -> u64 {
        self.insertions
    }

    /// Fraction of bits currently set, between 0.0 and 1.0.
    pub fn fill_ratio(&self) -> f64 {
        self.bits.count_ones() as f64 / self.bit_count as f64
    }

    /// Get the configuration of this filter.
    pub fn config(&self) -> &BloomFilterConfig {
        &self.config
    }

    /// Read-only view of the backing bits.
    pub fn bits(&self) -> &BitStore {
        &self.bits
    }
}

impl<K, H1, H2, H3, H4> Clone for BloomFilter<K, H1, H2, H3, H4>
where
    K: ?Sized,
    H1: Clone,
    H2: Clone,
    H3: Clone,
    H4: Clone,
{
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            bit_count: self.bit_count,
            bits: self.bits.clone(),
            h1: self.h1.clone(),
            h2: self.h2.clone(),
            h3: self.h3.clone(),
            h4: self.h4.clone(),
            insertions: self.insertions,
            _marker: PhantomData,
        }
    }
}

impl<K: ?Sized, H1, H2, H3, H4> fmt::Debug for BloomFilter<K, H1, H2, H3, H4> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("capacity", &self.config.capacity())
            .field("amplification", &self.config.amplification())
            .field("bit_count", &self.bit_count)
            .field("insertions", &self.insertions)
            .finish_non_exhaustive()
    }
}
