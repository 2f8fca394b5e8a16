//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, fast, no-std compatible.

use glam::Vec3;
use std::f32::consts::TAU;

/// Seedable pseudo-random number generator (xorshift64).
///
/// One instance lives in the `EngineContext` for the whole session. The web
/// bridge seeds it from browser entropy, tests seed it with fixed values.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound).
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        if upper_bound == 0 {
            return 0;
        }
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// Uniform float in [0, 1).
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform float in [lo, hi).
    #[inline]
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// Uniform float in [-0.5, 0.5).
    #[inline]
    pub fn signed(&mut self) -> f32 {
        self.next_f32() - 0.5
    }

    /// True with probability `p`.
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Random angle in [0, TAU).
    #[inline]
    pub fn angle(&mut self) -> f32 {
        self.next_f32() * TAU
    }

    /// Direction on the unit sphere from a uniform azimuth and `acos(2u - 1)` polar angle.
    pub fn unit_sphere(&mut self) -> Vec3 {
        let theta = self.angle();
        let phi = (2.0 * self.next_f32() - 1.0).clamp(-1.0, 1.0).acos();
        Vec3::new(
            phi.sin() * theta.cos(),
            phi.sin() * theta.sin(),
            phi.cos(),
        )
    }
}
