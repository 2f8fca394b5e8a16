use morph_engine::bridge::protocol::{
    FLAG_BLUR, FLAG_COLORS_DIRTY, FLAG_POSITIONS_DIRTY, HEADER_AUTO_ROTATE, HEADER_AZIMUTH,
    HEADER_EFFECT_POINT_COUNT, HEADER_EVENT_COUNT, HEADER_FLAGS, HEADER_FLOATS,
    HEADER_FRAME_COUNTER, HEADER_POINT_SIZE, HEADER_SOUND_COUNT,
};
use morph_engine::{
    EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue, ProtocolLayout,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    initialized: bool,
    frame: u32,
    /// Flat buffer of sound event IDs for SharedArrayBuffer reads.
    sound_buffer: Vec<u8>,
}

impl<G: Game> GameRunner<G> {
    /// Build the engine for `game`. `entropy` seeds the session unless the
    /// game's config pins a seed.
    pub fn new(game: G, entropy: u64) -> Self {
        let config = game.config();
        Self::build(game, config, entropy)
    }

    /// Like `new`, with host JSON overriding fields of the game's engine config.
    /// Malformed or invalid overrides are logged and ignored.
    pub fn with_overrides(game: G, json: &str, entropy: u64) -> Self {
        let base = game.config();
        let config = match base.with_overrides(json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("engine overrides ignored: {}", err);
                base
            }
        };
        Self::build(game, config, entropy)
    }

    fn build(game: G, mut config: GameConfig, entropy: u64) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("rejected game config ({}), using defaults", err);
            config = GameConfig::default();
        }
        let seed = if config.seed != 0 { config.seed } else { entropy };

        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            game,
            ctx: EngineContext::new(&config, seed),
            input: InputQueue::new(),
            timestep,
            header: layout.header(),
            layout,
            config,
            initialized: false,
            frame: 0,
            sound_buffer,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.write_header();
    }

    /// Forward host JSON settings to the game. Failures are logged and ignored.
    pub fn configure(&mut self, json: &str) {
        if let Err(err) = self.game.configure(json) {
            log::warn!("config ignored: {}", err);
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Camera position on the ground plane; the azimuth feeds glyph orientation.
    pub fn set_camera(&mut self, x: f32, z: f32) {
        self.ctx.view.azimuth = x.atan2(z);
    }

    /// Run one frame tick: fixed-step updates, then pack the frame's outputs.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();
        self.ctx.pool.clear_dirty();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.ctx.time = self.timestep.advance();
            self.game.update(&mut self.ctx, &self.input);
            // Input is delivered to exactly one step.
            self.input.drain();
            self.ctx.effects.tick(self.timestep.dt());
            self.ctx.step_pool();
        }

        self.ctx.effects.rebuild_effects_buffer();

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        for sound in self.ctx.sounds.iter().take(self.layout.max_sounds) {
            self.sound_buffer.push(sound.0 as u8);
        }
        if self.ctx.events.len() > self.layout.max_events {
            log::warn!("dropping {} game events", self.ctx.events.len() - self.layout.max_events);
            self.ctx.events.truncate(self.layout.max_events);
        }

        self.frame = self.frame.wrapping_add(1);
        self.write_header();
    }

    fn write_header(&mut self) {
        let view = &self.ctx.view;
        let mut flags = 0;
        if self.ctx.pool.positions_dirty() {
            flags |= FLAG_POSITIONS_DIRTY;
        }
        if self.ctx.pool.colors_dirty() {
            flags |= FLAG_COLORS_DIRTY;
        }
        if view.blur {
            flags |= FLAG_BLUR;
        }
        self.header[HEADER_FRAME_COUNTER] = self.frame as f32;
        self.header[HEADER_FLAGS] = flags as f32;
        self.header[HEADER_EFFECT_POINT_COUNT] = self.ctx.effects.effects_vertex_count() as f32;
        self.header[HEADER_SOUND_COUNT] = self.sound_buffer.len() as f32;
        self.header[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        self.header[HEADER_POINT_SIZE] = view.point_size;
        self.header[HEADER_AUTO_ROTATE] = view.auto_rotate.unwrap_or(0.0);
        self.header[HEADER_AZIMUTH] = view.azimuth;
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn positions_ptr(&self) -> *const f32 {
        self.ctx.pool.position_floats().as_ptr()
    }

    pub fn colors_ptr(&self) -> *const f32 {
        self.ctx.pool.color_floats().as_ptr()
    }

    pub fn particle_count(&self) -> u32 {
        self.ctx.pool.len() as u32
    }

    pub fn positions_dirty(&self) -> bool {
        self.ctx.pool.positions_dirty()
    }

    pub fn colors_dirty(&self) -> bool {
        self.ctx.pool.colors_dirty()
    }

    pub fn effects_ptr(&self) -> *const f32 {
        self.ctx.effects.effects_buffer_ptr()
    }

    pub fn effects_point_count(&self) -> u32 {
        self.ctx.effects.effects_vertex_count() as u32
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.ctx.star_floats().as_ptr()
    }

    pub fn star_count(&self) -> u32 {
        self.ctx.stars.len() as u32
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.event_floats().as_ptr()
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- View accessors ----

    /// Auto-rotate speed, 0 when off.
    pub fn auto_rotate(&self) -> f32 {
        self.ctx.view.auto_rotate.unwrap_or(0.0)
    }

    pub fn point_size(&self) -> f32 {
        self.ctx.view.point_size
    }

    pub fn blur(&self) -> bool {
        self.ctx.view.blur
    }

    // ---- Capacity accessors ----

    pub fn pool_size(&self) -> u32 {
        self.layout.pool_size as u32
    }

    pub fn max_effect_points(&self) -> u32 {
        self.layout.max_effect_points as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn fixed_dt(&self) -> f32 {
        self.config.fixed_dt
    }
}
