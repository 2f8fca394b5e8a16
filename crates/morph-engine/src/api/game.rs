use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::types::{GameEvent, SoundEvent};
use crate::core::rng::Rng;
use crate::effects::EffectsState;
use crate::error::{ConfigError, GlyphError};
use crate::glyph::{GlyphRasterizer, GlyphStyle};
use crate::input::queue::InputQueue;
use crate::particles::{ParticlePool, RateSpec};
use crate::shapes::{self, ShapeKind, ShapeLibrary};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Particles in the pool (default: 5000).
    pub pool_size: usize,
    /// Background stars, static for the session (default: 0).
    pub star_count: usize,
    /// Maximum number of effect points written per frame (default: 16384).
    pub max_effect_points: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 64).
    pub max_events: usize,
    /// RNG seed. 0 lets the host pick one.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            pool_size: 5000,
            star_count: 0,
            max_effect_points: 16384,
            max_sounds: 32,
            max_events: 64,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Apply the fields present in a JSON object on top of `self`.
    /// Fields the object leaves out keep their current values.
    pub fn with_overrides(&self, json: &str) -> Result<Self, ConfigError> {
        let patch: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut value = serde_json::to_value(self)?;
        if let serde_json::Value::Object(fields) = &mut value {
            fields.extend(patch);
        }
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(ConfigError::InvalidTimestep(self.fixed_dt));
        }
        Ok(())
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Apply host-supplied JSON settings. Called before init when present.
    fn configure(&mut self, _json: &str) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Setup initial state: first targets, colors, scheduled intro.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. React to input, fire due timers, retarget the pool.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Camera and presentation state shared with the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Camera angle around the vertical axis, written by the host.
    pub azimuth: f32,
    /// Orbit auto-rotate speed, `None` when the camera holds still.
    pub auto_rotate: Option<f32>,
    pub point_size: f32,
    /// Whether the page should blur the canvas behind overlays.
    pub blur: bool,
}

impl ViewState {
    pub const DEFAULT_POINT_SIZE: f32 = 0.8;
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            azimuth: 0.0,
            auto_rotate: None,
            point_size: Self::DEFAULT_POINT_SIZE,
            blur: false,
        }
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub pool: ParticlePool,
    pub shapes: ShapeLibrary,
    pub glyphs: GlyphRasterizer,
    pub effects: EffectsState,
    pub view: ViewState,
    pub stars: Vec<Vec3>,
    pub rng: Rng,
    /// Session clock in seconds, advanced by the runner each fixed step.
    pub time: f64,
    pub dt: f32,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
}

impl EngineContext {
    /// Build the pool, every precomputed shape and the starfield from one seed.
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let pool = ParticlePool::new(config.pool_size, &mut rng);
        let shapes = ShapeLibrary::generate(config.pool_size, &mut rng);
        let stars = shapes::scatter::starfield(config.star_count, &mut rng);
        Self {
            pool,
            shapes,
            glyphs: GlyphRasterizer::default(),
            effects: EffectsState::new(seed, config.max_effect_points),
            view: ViewState::default(),
            stars,
            rng,
            time: 0.0,
            dt: config.fixed_dt,
            sounds: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Point every particle at a precomputed shape.
    pub fn retarget_shape(&mut self, kind: ShapeKind, rate: RateSpec) -> usize {
        let n = self.pool.retarget(self.shapes.get(kind), rate, &mut self.rng);
        log::debug!("retarget {:?}: {} particles", kind, n);
        n
    }

    /// Point every particle at an arbitrary target set.
    pub fn retarget_points(&mut self, targets: &[Vec3], rate: RateSpec) -> usize {
        self.pool.retarget(targets, rate, &mut self.rng)
    }

    /// Rasterize `text` facing the current camera and retarget the pool to it.
    /// On failure the pool keeps its previous targets.
    pub fn retarget_text(
        &mut self,
        text: &str,
        style: GlyphStyle,
        rate: RateSpec,
    ) -> Result<usize, GlyphError> {
        let points = self.glyphs.rasterize(
            text,
            style,
            self.view.azimuth,
            self.pool.len(),
            &mut self.rng,
        )?;
        self.shapes.set_text(points);
        Ok(self.retarget_shape(ShapeKind::Text, rate))
    }

    /// Advance the pool one fixed step at the current clock.
    pub fn step_pool(&mut self) {
        self.pool.tick(self.time);
    }

    /// Flat `[x, y, z]` star positions.
    pub fn star_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.stars)
    }

    /// Flat `[kind, a, b, c]` game events.
    pub fn event_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.events)
    }

    /// Emit a sound event to be forwarded to the page.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the page.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}
