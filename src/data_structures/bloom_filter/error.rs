// Copyright (c) 2025 QuadBloom Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Bloom filter.

/// Errors that can occur when building a Bloom filter.
///
/// Insertion and lookup never fail; only construction can.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum BloomFilterError {
    /// The filter has an invalid configuration
    #[error("Invalid filter configuration: {0}")]
    InvalidConfiguration(String),

    /// capacity * amplification does not fit in the address space
    #[error("Bit count overflow: capacity {capacity} * amplification {amplification} exceeds usize")]
    BitCountOverflow {
        /// Requested capacity
        capacity: usize,
        /// Requested amplification
        amplification: usize,
    },
}

/// Result type for Bloom filter operations
pub type Result<T> = std::result::Result<T, BloomFilterError>;
