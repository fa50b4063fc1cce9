#![forbid(unsafe_code)]

//! Seeded random source for randomized effects.
//!
//! A plain xorshift64 generator. Randomized effects draw from the source
//! owned by the label, so a label built with the same seed and stepped with
//! the same frame deltas reproduces the same output.

/// xorshift64 pseudo-random generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Create a generator. A zero seed is remapped, since xorshift sticks at 0.
    pub const fn new(seed: u64) -> Self {
        let state = if seed == 0 { 0x2545_F491_4F6C_DD1D } else { seed };
        Self { state }
    }

    /// Next raw 64-bit value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform float in `[-1, 1)`.
    #[inline]
    pub fn next_signed(&mut self) -> f32 {
        self.next_f32() * 2.0 - 1.0
    }

    /// Uniform float in `[low, high)`.
    #[inline]
    pub fn range(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.next_f32()
    }

    /// `true` with probability `chance` (clamped to `[0, 1]`).
    #[inline]
    pub fn chance(&mut self, chance: f32) -> bool {
        self.next_f32() < chance.clamp(0.0, 1.0)
    }
}

impl Default for Xorshift64 {
    fn default() -> Self {
        Self::new(0x9E37_79B9_7F4A_7C15)
    }
}
