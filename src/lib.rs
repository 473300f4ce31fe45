//! QuadBloom library.
//!
//! A four-probe Bloom filter over a fixed bit array, the configuration and
//! error plumbing around it, and a harness that measures its false positive
//! behaviour. The `quadbloom` binary is a thin CLI over this library.
//!
//! # Architecture
//!
//! - `data_structures::bloom_filter`: the filter, its bit store and hash strategies
//! - `config`: layered file/environment configuration
//! - `error`: application error types
//! - `harness`: membership demo and false positive measurement

pub mod config;
pub mod data_structures;
pub mod error;
pub mod harness;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for QuadBloom.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
