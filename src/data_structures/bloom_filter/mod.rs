// Copyright (c) 2025 QuadBloom Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Four-probe Bloom filter.
//!
//! A space-efficient probabilistic set: it answers "is this key possibly a
//! member?" with no false negatives and a false positive rate controlled by
//! how many bits are allocated per expected key.
//!
//! # Features
//!
//! - Fixed memory: `capacity * amplification` bits, allocated once.
//! - Four independent classic string hashes (BKDR, AP, DJB, JS) by default.
//! - Hash strategies are generic parameters; anything implementing
//!   [`KeyHasher`] can take a slot.
//! - Zero unsafe code.
//!
//! # Example
//!
//! ```
//! use quadbloom_lib::data_structures::bloom_filter::{BloomFilter, BloomFilterConfig};
//!
//! let config = BloomFilterConfig::new()
//!     .with_capacity(10_000)
//!     .with_amplification(8);
//! let mut filter = BloomFilter::with_config(config).unwrap();
//!
//! filter.insert("hello");
//! assert!(filter.query("hello"));
//! ```
//!
//! # Pre-filtering
//!
//! The usual pattern is to consult the filter before an expensive lookup and
//! only pay for the lookup when the filter says the key may exist:
//!
//! ```
//! use std::collections::HashMap;
//! use quadbloom_lib::data_structures::bloom_filter::BloomFilter;
//!
//! struct GuardedStore {
//!     filter: BloomFilter,
//!     backing: HashMap<String, u64>,
//! }
//!
//! impl GuardedStore {
//!     fn put(&mut self, key: &str, value: u64) {
//!         self.filter.insert(key);
//!         self.backing.insert(key.to_string(), value);
//!     }
//!
//!     fn get(&self, key: &str) -> Option<u64> {
//!         if !self.filter.query(key) {
//!             return None;
//!         }
//!         self.backing.get(key).copied()
//!     }
//! }
//!
//! let mut store = GuardedStore {
//!     filter: BloomFilter::new(100, 6).unwrap(),
//!     backing: HashMap::new(),
//! };
//! store.put("answer", 42);
//! assert_eq!(store.get("answer"), Some(42));
//! ```

// Module declarations
mod bits;
mod config;
mod error;
mod filter;
mod hash;

// Re-exports
pub use bits::BitStore;
pub use config::{BloomFilterConfig, DEFAULT_AMPLIFICATION, HASH_PROBES};
pub use error::{BloomFilterError, Result};
pub use filter::BloomFilter;
pub use hash::{ApHash, BkdrHash, DjbHash, FnvHash, JsHash, KeyHasher};
