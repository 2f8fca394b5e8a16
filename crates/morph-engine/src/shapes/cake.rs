//! Three-tier cake with lace trim, candle and flame.
//!
//! Each particle is assigned a band by cumulative probability, then drawn from
//! that band's cylinder or ring. Layer radii are surface-biased so most points
//! sit on the outer shell and the silhouette reads clearly.

use glam::Vec3;

use crate::core::rng::Rng;

/// Which part of the cake a point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CakeBand {
    Base,
    Middle,
    Top,
    /// Wavy cream ring on top of tier 0 (base), 1 (middle) or 2 (top).
    Lace(u8),
    CandleBody,
    Flame,
}

/// A cylindrical cake tier.
#[derive(Debug, Clone, Copy)]
pub struct Tier {
    pub radius: f32,
    pub bottom: f32,
    pub height: f32,
    /// Probability that a point lands exactly on the outer shell.
    pub shell_bias: f32,
}

pub const BASE_TIER: Tier = Tier { radius: 12.0, bottom: -12.0, height: 8.0, shell_bias: 0.7 };
pub const MIDDLE_TIER: Tier = Tier { radius: 8.0, bottom: -4.0, height: 8.0, shell_bias: 0.7 };
pub const TOP_TIER: Tier = Tier { radius: 5.0, bottom: 4.0, height: 6.0, shell_bias: 0.8 };

/// Lace rings as (radius, height), base to top.
pub const LACE_RINGS: [(f32, f32); 3] = [(12.5, -4.0), (8.5, 4.0), (5.5, 10.0)];
/// Crests per lace ring.
const LACE_CRESTS: f32 = 12.0;
/// Peak vertical wave of the lace; the radial wave is half of it.
const LACE_WAVE: f32 = 0.5;

pub const CANDLE_HALF_WIDTH: f32 = 0.4;
pub const CANDLE_BOTTOM: f32 = 10.0;
pub const CANDLE_HEIGHT: f32 = 5.0;
pub const FLAME_RADIUS: f32 = 1.0;
pub const FLAME_BOTTOM: f32 = 15.0;
pub const FLAME_HEIGHT: f32 = 3.0;

/// Cumulative probability thresholds: base 30%, middle 25%, top 25%, lace 15%,
/// candle 3%, flame the remaining 2%.
const BAND_THRESHOLDS: [(f32, CakeBand); 5] = [
    (0.30, CakeBand::Base),
    (0.55, CakeBand::Middle),
    (0.80, CakeBand::Top),
    (0.95, CakeBand::Lace(0)),
    (0.98, CakeBand::CandleBody),
];

impl CakeBand {
    fn pick(rng: &mut Rng) -> Self {
        let roll = rng.next_f32();
        let band = BAND_THRESHOLDS
            .iter()
            .find(|(limit, _)| roll < *limit)
            .map(|(_, band)| *band)
            .unwrap_or(CakeBand::Flame);
        match band {
            CakeBand::Lace(_) => CakeBand::Lace(rng.next_int(3) as u8),
            other => other,
        }
    }
}

impl Tier {
    fn sample(&self, rng: &mut Rng) -> Vec3 {
        let r = if rng.chance(self.shell_bias) {
            self.radius
        } else {
            rng.next_f32() * self.radius
        };
        let theta = rng.angle();
        Vec3::new(
            r * theta.cos(),
            self.bottom + rng.next_f32() * self.height,
            r * theta.sin(),
        )
    }
}

fn lace(tier: u8, rng: &mut Rng) -> Vec3 {
    let (radius, height) = LACE_RINGS[tier as usize % LACE_RINGS.len()];
    let theta = rng.angle();
    let wave = (theta * LACE_CRESTS).sin() * LACE_WAVE;
    let r = radius + wave * 0.5;
    Vec3::new(r * theta.cos(), height + wave, r * theta.sin())
}

fn candle(rng: &mut Rng) -> Vec3 {
    Vec3::new(
        rng.signed() * 2.0 * CANDLE_HALF_WIDTH,
        CANDLE_BOTTOM + rng.next_f32() * CANDLE_HEIGHT,
        rng.signed() * 2.0 * CANDLE_HALF_WIDTH,
    )
}

fn flame(rng: &mut Rng) -> Vec3 {
    // Radius shrinks toward the rim: r = u * (1 - v²).
    let v = rng.next_f32();
    let r = rng.next_f32() * FLAME_RADIUS * (1.0 - v * v);
    let theta = rng.angle();
    Vec3::new(
        r * theta.cos(),
        FLAME_BOTTOM + rng.next_f32() * FLAME_HEIGHT,
        r * theta.sin(),
    )
}

/// Draw one point and report its band.
pub fn cake_point(rng: &mut Rng) -> (Vec3, CakeBand) {
    let band = CakeBand::pick(rng);
    let p = match band {
        CakeBand::Base => BASE_TIER.sample(rng),
        CakeBand::Middle => MIDDLE_TIER.sample(rng),
        CakeBand::Top => TOP_TIER.sample(rng),
        CakeBand::Lace(tier) => lace(tier, rng),
        CakeBand::CandleBody => candle(rng),
        CakeBand::Flame => flame(rng),
    };
    (p, band)
}

/// `count` cake points with their bands, index-aligned.
pub fn cake_with_bands(count: usize, rng: &mut Rng) -> Vec<(Vec3, CakeBand)> {
    (0..count).map(|_| cake_point(rng)).collect()
}
