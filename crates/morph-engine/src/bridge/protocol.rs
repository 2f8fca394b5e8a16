/// SharedArrayBuffer layout.
/// Must stay in sync with the page's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Positions: pool_size × 3 floats]
/// [Colors: pool_size × 3 floats]
/// [Effects: max_effect_points × 7 floats]
/// [Stars: star_count × 3 floats]
/// [Sounds: max_sounds × 1 float]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// The page reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::effects::EFFECT_FLOATS;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_POOL_SIZE: usize = 2;
pub const HEADER_FLAGS: usize = 3;
pub const HEADER_MAX_EFFECT_POINTS: usize = 4;
pub const HEADER_EFFECT_POINT_COUNT: usize = 5;
pub const HEADER_STAR_COUNT: usize = 6;
pub const HEADER_MAX_SOUNDS: usize = 7;
pub const HEADER_SOUND_COUNT: usize = 8;
pub const HEADER_MAX_EVENTS: usize = 9;
pub const HEADER_EVENT_COUNT: usize = 10;
pub const HEADER_PROTOCOL_VERSION: usize = 11;
pub const HEADER_POINT_SIZE: usize = 12;
/// Auto-rotate speed, 0 when off.
pub const HEADER_AUTO_ROTATE: usize = 13;
pub const HEADER_AZIMUTH: usize = 14;
pub const HEADER_RESERVED: usize = 15;

/// Bits of `HEADER_FLAGS`.
pub const FLAG_POSITIONS_DIRTY: u32 = 1;
pub const FLAG_COLORS_DIRTY: u32 = 1 << 1;
pub const FLAG_BLUR: u32 = 1 << 2;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per particle in the position and color sections: x, y, z / r, g, b.
pub const PARTICLE_FLOATS: usize = 3;

/// Floats per star: x, y, z.
pub const STAR_FLOATS: usize = 3;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub pool_size: usize,
    pub max_effect_points: usize,
    pub star_count: usize,
    /// Maximum sound events per frame.
    pub max_sounds: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    pub position_data_floats: usize,
    pub color_data_floats: usize,
    pub effects_data_floats: usize,
    pub star_data_floats: usize,
    pub sound_data_floats: usize,
    pub event_data_floats: usize,

    pub position_data_offset: usize,
    pub color_data_offset: usize,
    pub effects_data_offset: usize,
    pub star_data_offset: usize,
    pub sound_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        pool_size: usize,
        max_effect_points: usize,
        star_count: usize,
        max_sounds: usize,
        max_events: usize,
    ) -> Self {
        let position_data_floats = pool_size * PARTICLE_FLOATS;
        let color_data_floats = pool_size * PARTICLE_FLOATS;
        let effects_data_floats = max_effect_points * EFFECT_FLOATS;
        let star_data_floats = star_count * STAR_FLOATS;
        let sound_data_floats = max_sounds;
        let event_data_floats = max_events * EVENT_FLOATS;

        let position_data_offset = HEADER_FLOATS;
        let color_data_offset = position_data_offset + position_data_floats;
        let effects_data_offset = color_data_offset + color_data_floats;
        let star_data_offset = effects_data_offset + effects_data_floats;
        let sound_data_offset = star_data_offset + star_data_floats;
        let event_data_offset = sound_data_offset + sound_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            pool_size,
            max_effect_points,
            star_count,
            max_sounds,
            max_events,
            position_data_floats,
            color_data_floats,
            effects_data_floats,
            star_data_floats,
            sound_data_floats,
            event_data_floats,
            position_data_offset,
            color_data_offset,
            effects_data_offset,
            star_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.pool_size,
            config.max_effect_points,
            config.star_count,
            config.max_sounds,
            config.max_events,
        )
    }

    /// Capacity header written once at init. Per-frame fields start at zero.
    pub fn header(&self) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_POOL_SIZE] = self.pool_size as f32;
        header[HEADER_MAX_EFFECT_POINTS] = self.max_effect_points as f32;
        header[HEADER_STAR_COUNT] = self.star_count as f32;
        header[HEADER_MAX_SOUNDS] = self.max_sounds as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());

        assert_eq!(layout.pool_size, 5000);
        assert_eq!(layout.position_data_floats, 15_000);
        assert_eq!(layout.color_data_floats, 15_000);
        assert_eq!(layout.effects_data_floats, 16384 * 7);
        assert_eq!(layout.star_data_floats, 0);
        assert_eq!(layout.sound_data_floats, 32);
        assert_eq!(layout.event_data_floats, 64 * 4);

        let expected_total = 16 + 15_000 * 2 + 16384 * 7 + 32 + 64 * 4;
        assert_eq!(layout.buffer_total_floats, expected_total);
        assert_eq!(layout.buffer_total_bytes, expected_total * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 200, 30, 10, 20);

        assert_eq!(layout.position_data_offset, HEADER_FLOATS);
        assert_eq!(layout.color_data_offset, layout.position_data_offset + layout.position_data_floats);
        assert_eq!(layout.effects_data_offset, layout.color_data_offset + layout.color_data_floats);
        assert_eq!(layout.star_data_offset, layout.effects_data_offset + layout.effects_data_floats);
        assert_eq!(layout.sound_data_offset, layout.star_data_offset + layout.star_data_floats);
        assert_eq!(layout.event_data_offset, layout.sound_data_offset + layout.sound_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }

    #[test]
    fn header_carries_capacities() {
        let layout = ProtocolLayout::new(100, 200, 30, 10, 20);
        let header = layout.header();
        assert_eq!(header[HEADER_POOL_SIZE], 100.0);
        assert_eq!(header[HEADER_MAX_EFFECT_POINTS], 200.0);
        assert_eq!(header[HEADER_STAR_COUNT], 30.0);
        assert_eq!(header[HEADER_MAX_SOUNDS], 10.0);
        assert_eq!(header[HEADER_MAX_EVENTS], 20.0);
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_FRAME_COUNTER], 0.0);
    }
}
