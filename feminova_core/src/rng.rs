// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small seeded pseudo-random generator.
//!
//! The counter's growth delays and the affirmation fallback pick only need a
//! plausible spread, not statistical quality. A 64-bit LCG keeps the core
//! `no_std` and makes every test reproducible from its seed.

/// 64-bit linear congruential generator.
#[derive(Clone, Debug)]
pub struct Lcg64 {
    state: u64,
}

impl Lcg64 {
    /// Creates a generator from a seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Returns a uniform value in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        ((self.state >> 11) as f64) / ((1_u64 << 53) as f64)
    }

    /// Returns a uniform value in `[lo, hi)`.
    pub fn next_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_unit()
    }

    /// Returns a uniform index in `[0, len)`. `len` must be non-zero.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "unit value times len is in [0, len)"
    )]
    pub fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next_unit() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }
}
