//! Test modules for QuadBloom.
//!
//! Cross-module tests live here; unit tests sit next to the code they cover.
//! - Configuration loading and validation
//! - Error conversion and reporting
//! - Property-based tests for the Bloom filter


// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{create_test_dir, key_set_strategy, key_strategy, TestFixture};
