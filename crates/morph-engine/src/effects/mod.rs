//! Ephemeral effects overlaid on the main scene.
//!
//! `EffectsState` owns short-lived firework bursts and the interleaved vertex
//! buffer the renderer reads. It never touches the particle pool.

mod firework;

pub use firework::FireworkBurst;

use crate::core::rng::Rng;

/// Floats per effect vertex: position, color, alpha.
pub const EFFECT_FLOATS: usize = 7;

/// Suggested render size for effect points.
pub const EFFECT_POINT_SIZE: f32 = 3.0;

/// Container for all live bursts.
pub struct EffectsState {
    pub bursts: Vec<FireworkBurst>,
    pub effects_buffer: Vec<f32>,
    pub rng: Rng,
    max_points: usize,
}

impl EffectsState {
    /// Create an EffectsState with the given RNG seed and point budget.
    pub fn new(seed: u64, max_points: usize) -> Self {
        EffectsState {
            bursts: Vec::new(),
            effects_buffer: Vec::with_capacity(max_points * EFFECT_FLOATS),
            rng: Rng::new(seed.wrapping_add(7919)),
            max_points,
        }
    }

    /// Spawn one burst biased toward `bias` on x (0 = anywhere).
    pub fn spawn_burst(&mut self, bias: f32) {
        let burst = FireworkBurst::spawn(bias, &mut self.rng);
        log::debug!("firework at {:?} with {} points", burst.center, burst.len());
        self.bursts.push(burst);
    }

    /// Age every burst and drop the finished ones.
    pub fn tick(&mut self, dt: f32) {
        self.bursts.retain_mut(|b| b.tick(dt));
    }

    /// Rebuild the vertex buffer, truncated at the point budget.
    pub fn rebuild_effects_buffer(&mut self) {
        self.effects_buffer.clear();
        let mut budget = self.max_points;
        for burst in &self.bursts {
            if budget == 0 {
                break;
            }
            budget -= burst.write_vertices(&mut self.effects_buffer, budget);
        }
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn effects_vertex_count(&self) -> usize {
        self.effects_buffer.len() / EFFECT_FLOATS
    }

    pub fn effects_buffer_ptr(&self) -> *const f32 {
        self.effects_buffer.as_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bursts_expire() {
        let mut effects = EffectsState::new(42, 16384);
        effects.spawn_burst(-60.0);
        effects.spawn_burst(60.0);
        assert_eq!(effects.bursts.len(), 2);

        effects.tick(1.0);
        assert_eq!(effects.bursts.len(), 2);
        effects.tick(2.0);
        assert!(effects.bursts.is_empty());
    }

    #[test]
    fn buffer_holds_every_point() {
        let mut effects = EffectsState::new(42, 16384);
        effects.spawn_burst(0.0);
        effects.spawn_burst(0.0);
        effects.rebuild_effects_buffer();
        let total: usize = effects.bursts.iter().map(|b| b.len()).sum();
        assert_eq!(effects.effects_vertex_count(), total);
        assert_eq!(effects.effects_buffer.len(), total * EFFECT_FLOATS);
    }

    #[test]
    fn buffer_respects_budget() {
        let mut effects = EffectsState::new(42, 100);
        for _ in 0..5 {
            effects.spawn_burst(0.0);
        }
        effects.rebuild_effects_buffer();
        assert_eq!(effects.effects_vertex_count(), 100);
    }
}
