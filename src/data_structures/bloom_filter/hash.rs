// Copyright (c) 2025 QuadBloom Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Hash strategies for the Bloom filter.
//!
//! Each strategy is a stateless, deterministic mapping from a key to a `u64`.
//! The four classic string hashes below are the filter's defaults; they consume
//! the key as raw bytes and rely on wrapping arithmetic as part of their mixing.
//! `ApHash` and `DjbHash` keep a 32-bit running state and widen the result.

use std::hash::Hasher;

/// The capability every hash strategy provides: map a key to an unsigned integer.
///
/// Implementations must return the same value for the same key on every call
/// and must not depend on any external or random state.
pub trait KeyHasher<K: ?Sized> {
    /// Hash `key` to an unsigned integer.
    fn hash_key(&self, key: &K) -> u64;
}

/// Multiplicative accumulate hash (BKDR): `h = h * 131 + c`, seeded at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BkdrHash;

/// Alternating bit-mixing hash (AP).
///
/// Even positions XOR in a shift blend of the state; odd positions XOR in the
/// complement of a wider blend. 32-bit state, seeded at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApHash;

/// Additive shift-accumulate hash (DJB): `h = h * 33 + c`, seeded at 5381.
/// 32-bit state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DjbHash;

/// XOR shift-mix hash (JS), seeded at 1315423911.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsHash;

/// FNV-1a over the key bytes. Not one of the defaults; any filter slot accepts it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FnvHash;

const BKDR_MULTIPLIER: u64 = 131;
const DJB_SEED: u32 = 5381;
const JS_SEED: u64 = 1_315_423_911;

impl<K: AsRef<[u8]> + ?Sized> KeyHasher<K> for BkdrHash {
    fn hash_key(&self, key: &K) -> u64 {
        key.as_ref().iter().fold(0u64, |hash, &c| {
            hash.wrapping_mul(BKDR_MULTIPLIER).wrapping_add(u64::from(c))
        })
    }
}

impl<K: AsRef<[u8]> + ?Sized> KeyHasher<K> for ApHash {
    fn hash_key(&self, key: &K) -> u64 {
        let hash = key
            .as_ref()
            .iter()
            .enumerate()
            .fold(0u32, |hash, (i, &c)| {
                let c = u32::from(c);
                if i & 1 == 0 {
                    hash ^ ((hash << 7) ^ c ^ (hash >> 3))
                } else {
                    hash ^ !((hash << 11) ^ c ^ (hash >> 5))
                }
            });
        u64::from(hash)
    }
}

impl<K: AsRef<[u8]> + ?Sized> KeyHasher<K> for DjbHash {
    fn hash_key(&self, key: &K) -> u64 {
        let hash = key.as_ref().iter().fold(DJB_SEED, |hash, &c| {
            hash.wrapping_add(hash << 5).wrapping_add(u32::from(c))
        });
        u64::from(hash)
    }
}

impl<K: AsRef<[u8]> + ?Sized> KeyHasher<K> for JsHash {
    fn hash_key(&self, key: &K) -> u64 {
        key.as_ref().iter().fold(JS_SEED, |hash, &c| {
            hash ^ (hash << 5).wrapping_add(u64::from(c)).wrapping_add(hash >> 2)
        })
    }
}

impl<K: AsRef<[u8]> + ?Sized> KeyHasher<K> for FnvHash {
    fn hash_key(&self, key: &K) -> u64 {
        let mut hasher = fnv::FnvHasher::default();
        hasher.write(key.as_ref());
        hasher.finish()
    }
}
