//! Data structures for QuadBloom.
//!
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Fixed allocation at construction, no allocation on hot paths
//! - Deterministic behaviour independent of process-wide state

pub mod bloom_filter;

// Re-export common data structures
pub use bloom_filter::{BloomFilter, BloomFilterConfig, BloomFilterError};
