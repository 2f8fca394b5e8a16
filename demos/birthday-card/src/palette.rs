use morph_engine::{CakeBand, Rgb, Rng};

pub const HEART_PINK: Rgb = Rgb::from_hex(0xFF9A9E);
pub const WISH_GOLD: Rgb = Rgb::from_hex(0xFFD700);
pub const COUNTDOWN_WHITE: Rgb = Rgb::WHITE;

/// Lightness spread of a uniform recolor (±0.1).
pub const UNIFORM_JITTER: f32 = 0.2;

const FLAME: Rgb = Rgb::from_hex(0xFFD700);
const FLAME_CORE: Rgb = Rgb::from_hex(0xFF4500);
const LACE: Rgb = Rgb::from_hex(0xFFFFFF);
const CANDLE: Rgb = Rgb::from_hex(0xFF69B4);
const TOP_TIER: Rgb = Rgb::from_hex(0xFFF8DC);
const MIDDLE_TIER: Rgb = Rgb::from_hex(0xFFFFE0);
const MIDDLE_CREAM: Rgb = Rgb::from_hex(0xF0E68C);
const BASE_TIER: Rgb = Rgb::from_hex(0xFFB6C1);

/// How to recolor the whole pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Palette {
    /// One color with a little lightness noise per particle.
    Uniform(Rgb),
    /// Warm or cool saturated hues, picked per particle.
    FireworkMix,
    /// Colors by the cake band each particle was generated in.
    CakeBands,
}

/// Red-orange-gold or blue-violet-pink, full saturation.
pub fn firework_color(rng: &mut Rng) -> Rgb {
    let hue = if rng.chance(0.5) {
        rng.next_f32() * 0.1
    } else {
        0.5 + rng.next_f32() * 0.3
    };
    Rgb::from_hsl(hue, 1.0, 0.6)
}

/// Color of a cake point by the band it was generated in.
pub fn cake_color(band: CakeBand, rng: &mut Rng) -> Rgb {
    match band {
        CakeBand::Flame => {
            if rng.chance(0.3) {
                FLAME_CORE
            } else {
                FLAME
            }
        }
        CakeBand::CandleBody => CANDLE,
        CakeBand::Lace(_) => LACE,
        CakeBand::Top => TOP_TIER,
        CakeBand::Middle => {
            if rng.chance(0.2) {
                MIDDLE_CREAM
            } else {
                MIDDLE_TIER
            }
        }
        CakeBand::Base => BASE_TIER,
    }
}
