use std::collections::HashMap;

use morph_engine::api::game::GameConfig;
use morph_engine::input::queue::{InputEvent, InputQueue};
use morph_engine::*;

use crate::config::CardConfig;
use crate::events::{Overlay, UiEvent};
use crate::palette::{self, Palette, UNIFORM_JITTER};
use crate::scene::{Command, Cue, SceneMachine, Slot, Target, Trigger};

const POOL_SIZE: usize = 5000;
const STAR_COUNT: usize = 1000;

/// The birthday card: a scene machine plus the timers that drive it.
pub struct BirthdayCard {
    machine: SceneMachine,
    sequencer: Sequencer<Cue>,
    slots: HashMap<Slot, SequenceId>,
}

impl BirthdayCard {
    pub fn new() -> Self {
        Self {
            machine: SceneMachine::new(CardConfig::default()),
            sequencer: Sequencer::new(),
            slots: HashMap::new(),
        }
    }

    pub fn machine(&self) -> &SceneMachine {
        &self.machine
    }

    fn handle(&mut self, ctx: &mut EngineContext, trigger: Trigger) {
        for command in self.machine.handle(trigger) {
            self.apply(ctx, command);
        }
    }

    fn apply(&mut self, ctx: &mut EngineContext, command: Command) {
        match command {
            Command::Retarget { target, rate } => retarget(ctx, target, rate),
            Command::Recolor(palette) => recolor(ctx, palette),
            Command::StartEasing => ctx.pool.set_animating(true),
            Command::PointSize(size) => ctx.view.point_size = size,
            Command::AutoRotate(speed) => ctx.view.auto_rotate = speed,
            Command::Blur => ctx.view.blur = true,
            Command::Sound(sound) => ctx.emit_sound(sound.to_event()),
            Command::Ui(event) => ctx.emit_event(event.to_event()),
            Command::Schedule { slot, steps } => {
                self.cancel(slot);
                let id = self.sequencer.schedule(steps);
                self.slots.insert(slot, id);
            }
            Command::Repeat { slot, interval, cue } => {
                self.cancel(slot);
                let id = self.sequencer.repeat(interval, cue);
                self.slots.insert(slot, id);
            }
            Command::Cancel(slot) => self.cancel(slot),
            Command::SpawnFirework { bias } => ctx.effects.spawn_burst(bias),
        }
    }

    fn cancel(&mut self, slot: Slot) {
        if let Some(id) = self.slots.remove(&slot) {
            self.sequencer.cancel(id);
        }
    }
}

impl Default for BirthdayCard {
    fn default() -> Self {
        Self::new()
    }
}

fn retarget(ctx: &mut EngineContext, target: Target, rate: RateSpec) {
    match target {
        Target::Shape(kind) => {
            ctx.retarget_shape(kind, rate);
        }
        Target::Glyph { text, style } => {
            if let Err(e) = ctx.retarget_text(&text, style, rate) {
                log::warn!("keeping previous targets: {}", e);
            }
        }
        Target::Point(point) => {
            let points = vec![point; ctx.pool.len()];
            ctx.retarget_points(&points, rate);
        }
        Target::Shell(shell) => {
            let points = shell.points(ctx.pool.len(), &mut ctx.rng);
            ctx.retarget_points(&points, rate);
        }
        Target::Blast => {
            let current = ctx.pool.particles().iter().map(|p| p.position);
            let points = shapes::radial_blast(current, &mut ctx.rng);
            ctx.retarget_points(&points, rate);
        }
    }
}

fn recolor(ctx: &mut EngineContext, scheme: Palette) {
    let rng = &mut ctx.rng;
    match scheme {
        Palette::Uniform(base) => ctx.pool.recolor_uniform(base, UNIFORM_JITTER, rng),
        Palette::FireworkMix => ctx.pool.recolor_with(|_, _| palette::firework_color(rng)),
        Palette::CakeBands => {
            let bands = ctx.shapes.cake_bands();
            ctx.pool.recolor_with(|i, _| match bands.get(i) {
                Some(&band) => palette::cake_color(band, rng),
                None => Rgb::WHITE,
            });
        }
    }
}

impl Game for BirthdayCard {
    fn config(&self) -> GameConfig {
        GameConfig {
            pool_size: POOL_SIZE,
            star_count: STAR_COUNT,
            ..GameConfig::default()
        }
    }

    fn configure(&mut self, json: &str) -> Result<(), ConfigError> {
        let config = CardConfig::from_json(json)?;
        log::info!("card config loaded: wish {:?}", config.wish_text);
        self.machine.set_config(config);
        Ok(())
    }

    /// The page starts with the start overlay up; nothing moves until it is clicked.
    fn init(&mut self, ctx: &mut EngineContext) {
        log::info!("birthday card ready: {} particles, {} stars", ctx.pool.len(), ctx.stars.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            let Some(region) = Overlay::from_id(event.region()) else {
                log::debug!("input on unknown region {}", event.region());
                continue;
            };
            let trigger = match event {
                InputEvent::Click { .. } => Trigger::Click(region),
                InputEvent::PressStart { .. } => Trigger::PressStart(region),
                InputEvent::PressEnd { .. } => Trigger::PressEnd(region),
            };
            self.handle(ctx, trigger);
        }

        for cue in self.sequencer.tick(ctx.dt) {
            self.handle(ctx, Trigger::Cue(cue));
        }
    }
}
