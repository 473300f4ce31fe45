// Copyright (c) 2025 QuadBloom Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Fixed-length bit storage backing the Bloom filter.

use bitvec::boxed::BitBox;
use bitvec::order::Lsb0;
use bitvec::vec::BitVec;

/// A fixed-length sequence of bits packed into `u64` words.
///
/// The length is chosen once at construction and never changes. Bits can be
/// set and tested but never cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStore {
    bits: BitBox<u64, Lsb0>,
}

impl BitStore {
    /// Allocate `len` zeroed bits.
    pub fn new(len: usize) -> Self {
        Self {
            bits: BitVec::<u64, Lsb0>::repeat(false, len).into_boxed_bitslice(),
        }
    }

    /// Mark bit `index` as set. Setting an already set bit has no effect.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn set(&mut self, index: usize) {
        self.check_index(index);
        self.bits.set(index, true);
    }

    /// Returns whether bit `index` is set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn test(&self, index: usize) -> bool {
        self.check_index(index);
        self.bits[index]
    }

    /// Number of addressable bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true if the store has no addressable bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of bits currently set.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    #[inline]
    fn check_index(&self, index: usize) {
        let len = self.bits.len();
        assert!(index < len, "bit index {index} out of range for length {len}");
    }
}
