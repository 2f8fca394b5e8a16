//! Fixed-size particle pool with exponential easing toward per-particle targets.

use glam::Vec3;

use super::color::Rgb;
use crate::core::rng::Rng;

/// Amplitude of the per-frame breathing offset added to rendered positions.
pub const BREATH_AMPLITUDE: f32 = 0.05;

/// Half-extent of the cube the pool is scattered in at startup.
const SCATTER_HALF_EXTENT: f32 = 50.0;

/// Easing-rate band assigned at startup.
const INITIAL_RATE: (f32, f32) = (0.02, 0.07);

/// A single point of the pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub target: Vec3,
    /// Fraction of the remaining distance covered per tick, in (0, 1].
    pub rate: f32,
    pub color: Rgb,
}

impl Particle {
    /// One easing step: `position += (target - position) * rate`, per axis.
    #[inline]
    pub fn step(&mut self) {
        self.position += (self.target - self.position) * self.rate;
    }

    #[inline]
    pub fn distance_to_target(&self) -> f32 {
        self.position.distance(self.target)
    }
}

/// How a retarget assigns easing rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateSpec {
    /// Leave every particle's rate untouched.
    Keep,
    /// Same rate for every particle.
    Fixed(f32),
    /// Independent uniform draw in [min, max) per particle.
    Uniform { min: f32, max: f32 },
}

impl RateSpec {
    /// Uniform band starting at `base` and `spread` wide.
    pub const fn banded(base: f32, spread: f32) -> Self {
        RateSpec::Uniform { min: base, max: base + spread }
    }

    fn sample(self, current: f32, rng: &mut Rng) -> f32 {
        match self {
            RateSpec::Keep => current,
            RateSpec::Fixed(rate) => rate,
            RateSpec::Uniform { min, max } => rng.range(min, max),
        }
    }
}

/// Owns every particle for the session and the flat buffers the renderer reads.
///
/// The render buffers are rewritten in place; a retarget mid-flight simply
/// redirects the ongoing ease.
pub struct ParticlePool {
    particles: Vec<Particle>,
    positions: Vec<Vec3>,
    colors: Vec<Rgb>,
    animating: bool,
    positions_dirty: bool,
    colors_dirty: bool,
}

impl ParticlePool {
    /// Allocate `count` particles scattered through a 100-unit cube, near-white,
    /// each targeting its own starting position.
    pub fn new(count: usize, rng: &mut Rng) -> Self {
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let position = Vec3::new(
                rng.range(-SCATTER_HALF_EXTENT, SCATTER_HALF_EXTENT),
                rng.range(-SCATTER_HALF_EXTENT, SCATTER_HALF_EXTENT),
                rng.range(-SCATTER_HALF_EXTENT, SCATTER_HALF_EXTENT),
            );
            particles.push(Particle {
                position,
                target: position,
                rate: rng.range(INITIAL_RATE.0, INITIAL_RATE.1),
                color: Rgb::from_hsl(0.0, 0.0, rng.range(0.9, 1.0)),
            });
        }

        let positions = particles.iter().map(|p| p.position).collect();
        let colors = particles.iter().map(|p| p.color).collect();

        Self {
            particles,
            positions,
            colors,
            animating: false,
            positions_dirty: true,
            colors_dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Whether `tick` moves particles. Off until the first scene that animates.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    /// Point every particle at `targets[i]`. Particles past the end of `targets`
    /// keep their previous target (and rate). Returns how many were retargeted.
    pub fn retarget(&mut self, targets: &[Vec3], rate: RateSpec, rng: &mut Rng) -> usize {
        let mut count = 0;
        for (p, &target) in self.particles.iter_mut().zip(targets) {
            p.target = target;
            p.rate = rate.sample(p.rate, rng);
            count += 1;
        }
        if count < self.particles.len() {
            log::debug!(
                "retarget covered {} of {} particles; the rest keep their targets",
                count,
                self.particles.len()
            );
        }
        count
    }

    /// Reassign easing rates without moving targets.
    pub fn set_rates(&mut self, rate: RateSpec, rng: &mut Rng) {
        for p in &mut self.particles {
            p.rate = rate.sample(p.rate, rng);
        }
    }

    /// Paint the whole pool `base`, each particle with a small lightness jitter.
    pub fn recolor_uniform(&mut self, base: Rgb, jitter: f32, rng: &mut Rng) {
        for (p, slot) in self.particles.iter_mut().zip(&mut self.colors) {
            p.color = base.jitter_lightness(jitter, rng);
            *slot = p.color;
        }
        self.colors_dirty = true;
    }

    /// Paint each particle with a per-particle color chosen by `f(index, particle)`.
    pub fn recolor_with<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, &Particle) -> Rgb,
    {
        for (i, (p, slot)) in self.particles.iter_mut().zip(&mut self.colors).enumerate() {
            p.color = f(i, p);
            *slot = p.color;
        }
        self.colors_dirty = true;
    }

    /// Advance every particle one easing step and rewrite the position buffer.
    ///
    /// `time` is the session clock in seconds; it drives a small index-dependent
    /// oscillation added to the rendered position only.
    pub fn tick(&mut self, time: f64) {
        if !self.animating {
            return;
        }
        for (i, (p, out)) in self.particles.iter_mut().zip(&mut self.positions).enumerate() {
            p.step();
            let breath = (time + i as f64).sin() as f32 * BREATH_AMPLITUDE;
            *out = p.position + Vec3::splat(breath);
        }
        self.positions_dirty = true;
    }

    /// Flat `x, y, z` per particle, as rendered this frame.
    pub fn position_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Flat `r, g, b` per particle.
    pub fn color_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn positions_dirty(&self) -> bool {
        self.positions_dirty
    }

    pub fn colors_dirty(&self) -> bool {
        self.colors_dirty
    }

    /// Called by the bridge once the renderer has picked the buffers up.
    pub fn clear_dirty(&mut self) {
        self.positions_dirty = false;
        self.colors_dirty = false;
    }
}
