//! The card's scene flow as a single tagged state.
//!
//! `transition` consumes the current stage and a trigger and returns the next
//! stage plus the side effects to carry out. It never touches the engine, so
//! every step of the flow can be checked in isolation.

use std::mem;

use glam::Vec3;
use morph_engine::{GlyphStyle, RateSpec, ShapeKind, Shell, ViewState};

use crate::blow::{BlowMeter, BlowTick, BLOW_TICK, FULL};
use crate::config::CardConfig;
use crate::events::{hints, Overlay, Sound, UiEvent};
use crate::letter::{LetterStep, Typewriter, LETTER_TICK};
use crate::palette::{self, Palette};

// Presentation timings (seconds)
const CROSS_FADE: f32 = 0.5;
const START_DISMISS: f32 = 1.0;
const WISH_FIREWORK_INTERVAL: f32 = 0.4;
const WISH_FIREWORK_BIAS: f32 = 60.0;
const COUNTDOWN_DELAY: f32 = 5.0;
const BURST_DELAY: f32 = 1.0;
const SCATTER_DELAY: f32 = 2.8;
const FINALE_END: f32 = 6.0;
const CANDLE_OUT_DELAY: f32 = 0.8;
const CARD_POP_DELAY: f32 = 0.6;
const LETTER_OPEN_DELAY: f32 = 0.5;

// Orbit speeds
const INTRO_ROTATE: f32 = 0.5;
const HEART_ROTATE: f32 = 4.0;
const CAKE_ROTATE: f32 = 2.0;

// Point sizes during the finale
const CONVERGE_SIZE: f32 = 2.0;
const BURST_SIZE: f32 = 4.0;
const SCATTER_SIZE: f32 = 1.5;

const CONVERGE_RATE: RateSpec = RateSpec::Fixed(0.1);
const BURST_RATE: RateSpec = RateSpec::Fixed(0.02);
const SCATTER_RATE: RateSpec = RateSpec::banded(0.02, 0.02);
const CAKE_RATE: RateSpec = RateSpec::banded(0.02, 0.01);
const BLAST_RATE: RateSpec = RateSpec::banded(0.005, 0.005);

const BURST_SHELL: Shell = Shell::new(60.0, 80.0);

/// Wide, flattened second explosion, lifted slightly.
fn scatter_shell() -> Shell {
    Shell::new(30.0, 70.0)
        .with_stretch(Vec3::new(1.8, 1.0, 0.5))
        .with_offset(Vec3::new(0.0, 5.0, 0.0))
}

/// Timer-delivered triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Reveal(Overlay),
    Dismiss(Overlay),
    WishFireworks,
    BeginCountdown,
    Countdown(u8),
    Converge,
    Burst,
    Scatter,
    FireworksDone,
    BlowTick,
    CandleOut,
    CardPop,
    OpenLetter,
    LetterTick,
}

/// Everything that can move the flow forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Click(Overlay),
    PressStart(Overlay),
    PressEnd(Overlay),
    Cue(Cue),
}

/// Named timer lanes. Each holds at most one live sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Removal of the start screen after the first click.
    Start,
    Overlay,
    Wish,
    Countdown,
    Finale,
    Blow,
    Presentation,
    Letter,
}

/// Where a retarget points the pool.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Shape(ShapeKind),
    Glyph { text: String, style: GlyphStyle },
    /// Every particle to one point.
    Point(Vec3),
    /// Fresh random shell, one sample per particle.
    Shell(Shell),
    /// Outward from each particle's current position.
    Blast,
}

/// Side effects of a transition, applied in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Retarget { target: Target, rate: RateSpec },
    Recolor(Palette),
    StartEasing,
    PointSize(f32),
    AutoRotate(Option<f32>),
    Blur,
    Sound(Sound),
    Ui(UiEvent),
    /// Replace the slot's sequence with these `(delay, cue)` steps.
    Schedule { slot: Slot, steps: Vec<(f32, Cue)> },
    /// Replace the slot's sequence with a repeating cue.
    Repeat { slot: Slot, interval: f32, cue: Cue },
    Cancel(Slot),
    SpawnFirework { bias: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Waiting for the start click.
    Idle,
    /// Particles drift as a cloud; nothing eases yet.
    Intro,
    /// Rotating heart. `wished` once the wish click started the finale.
    Heart { wished: bool },
    Cake { meter: BlowMeter },
    Letter { opened: bool, letter: Typewriter },
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Intro => "intro",
            Stage::Heart { .. } => "heart",
            Stage::Cake { .. } => "cake",
            Stage::Letter { .. } => "letter",
        }
    }
}

/// Owns the current stage and the card text it needs for transitions.
pub struct SceneMachine {
    stage: Stage,
    config: CardConfig,
}

impl SceneMachine {
    pub fn new(config: CardConfig) -> Self {
        Self { stage: Stage::Idle, config }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CardConfig) {
        self.config = config;
    }

    pub fn handle(&mut self, trigger: Trigger) -> Vec<Command> {
        let stage = mem::replace(&mut self.stage, Stage::Idle);
        let from = stage.name();
        let (next, commands) = transition(stage, trigger, &self.config);
        if next.name() != from {
            log::info!("scene {} -> {}", from, next.name());
        }
        self.stage = next;
        commands
    }
}

pub fn transition(stage: Stage, trigger: Trigger, config: &CardConfig) -> (Stage, Vec<Command>) {
    use Command::*;

    match (stage, trigger) {
        (stage, Trigger::Cue(Cue::Reveal(overlay))) => (stage, vec![Ui(UiEvent::ShowOverlay(overlay))]),
        (stage, Trigger::Cue(Cue::Dismiss(overlay))) => (stage, vec![Ui(UiEvent::HideOverlay(overlay))]),

        (Stage::Idle, Trigger::Click(Overlay::Start)) => (
            Stage::Intro,
            vec![
                Sound(crate::events::Sound::Music),
                retarget(Target::Shape(ShapeKind::Cloud), RateSpec::Keep),
                AutoRotate(Some(INTRO_ROTATE)),
                Schedule { slot: Slot::Overlay, steps: vec![(CROSS_FADE, Cue::Reveal(Overlay::Intro))] },
                Schedule { slot: Slot::Start, steps: vec![(START_DISMISS, Cue::Dismiss(Overlay::Start))] },
            ],
        ),

        (Stage::Intro, Trigger::Click(Overlay::Intro)) => {
            let mut commands = cross_fade(Overlay::Intro, Overlay::Particles);
            commands.extend([
                StartEasing,
                retarget(Target::Shape(ShapeKind::Heart), RateSpec::Keep),
                Recolor(Palette::Uniform(palette::HEART_PINK)),
                Ui(UiEvent::Hint(hints::MAKE_A_WISH)),
                AutoRotate(Some(HEART_ROTATE)),
            ]);
            (Stage::Heart { wished: false }, commands)
        }

        (Stage::Heart { wished: false }, Trigger::Click(Overlay::Particles)) => (
            Stage::Heart { wished: true },
            vec![
                Ui(UiEvent::Hint(hints::CLEAR)),
                retarget(glyph(&config.wish_text, GlyphStyle::Phrase), RateSpec::Keep),
                Recolor(Palette::Uniform(palette::WISH_GOLD)),
                AutoRotate(None),
                Repeat { slot: Slot::Wish, interval: WISH_FIREWORK_INTERVAL, cue: Cue::WishFireworks },
                Schedule { slot: Slot::Countdown, steps: vec![(COUNTDOWN_DELAY, Cue::BeginCountdown)] },
            ],
        ),

        (stage @ Stage::Heart { wished: true }, Trigger::Cue(cue)) => heart_cue(stage, cue, config),

        (Stage::Cake { mut meter }, Trigger::PressStart(Overlay::Cake)) => {
            let commands = if meter.press() {
                vec![Repeat { slot: Slot::Blow, interval: BLOW_TICK, cue: Cue::BlowTick }]
            } else {
                Vec::new()
            };
            (Stage::Cake { meter }, commands)
        }

        (Stage::Cake { mut meter }, Trigger::PressEnd(_)) => {
            let commands = if meter.release() { vec![Cancel(Slot::Blow)] } else { Vec::new() };
            (Stage::Cake { meter }, commands)
        }

        (Stage::Cake { mut meter }, Trigger::Cue(Cue::BlowTick)) => {
            let commands = match meter.tick() {
                BlowTick::Level(level) => vec![Ui(UiEvent::Meter(level))],
                BlowTick::Empty => vec![Ui(UiEvent::Meter(0.0)), Cancel(Slot::Blow)],
                BlowTick::Full => extinguish(),
                BlowTick::Stop => vec![Cancel(Slot::Blow)],
            };
            (Stage::Cake { meter }, commands)
        }

        (Stage::Cake { meter }, Trigger::Cue(Cue::CandleOut)) if meter.is_extinguished() => {
            let mut commands = cross_fade(Overlay::Cake, Overlay::Letter);
            commands.extend([
                Sound(crate::events::Sound::Song),
                Blur,
                Schedule { slot: Slot::Presentation, steps: vec![(CARD_POP_DELAY, Cue::CardPop)] },
            ]);
            let letter = Typewriter::new(&config.letter_text);
            (Stage::Letter { opened: false, letter }, commands)
        }

        (Stage::Letter { opened, letter }, Trigger::Cue(Cue::CardPop)) => {
            (Stage::Letter { opened, letter }, vec![Ui(UiEvent::CardPop)])
        }

        (Stage::Letter { opened: false, letter }, Trigger::Click(Overlay::Letter)) => (
            Stage::Letter { opened: true, letter },
            vec![
                Ui(UiEvent::OpenCard),
                Schedule { slot: Slot::Letter, steps: vec![(LETTER_OPEN_DELAY, Cue::OpenLetter)] },
            ],
        ),

        (Stage::Letter { opened: true, mut letter }, Trigger::Cue(Cue::OpenLetter)) => {
            let mut commands = type_next(&mut letter);
            if !letter.is_done() {
                commands.push(Repeat { slot: Slot::Letter, interval: LETTER_TICK, cue: Cue::LetterTick });
            }
            (Stage::Letter { opened: true, letter }, commands)
        }

        (Stage::Letter { opened: true, mut letter }, Trigger::Cue(Cue::LetterTick)) => {
            let mut commands = type_next(&mut letter);
            if letter.is_done() {
                commands.push(Cancel(Slot::Letter));
            }
            (Stage::Letter { opened: true, letter }, commands)
        }

        (stage, trigger) => {
            log::debug!("{:?} ignored in {}", trigger, stage.name());
            (stage, Vec::new())
        }
    }
}

/// Countdown and finale steps, all while the heart stage is confirmed.
fn heart_cue(stage: Stage, cue: Cue, config: &CardConfig) -> (Stage, Vec<Command>) {
    use Command::*;

    let commands = match cue {
        Cue::WishFireworks => vec![
            SpawnFirework { bias: -WISH_FIREWORK_BIAS },
            SpawnFirework { bias: WISH_FIREWORK_BIAS },
        ],
        Cue::BeginCountdown => vec![
            Cancel(Slot::Wish),
            AutoRotate(None),
            Recolor(Palette::Uniform(palette::COUNTDOWN_WHITE)),
            retarget(glyph("3", GlyphStyle::Numeric), RateSpec::Keep),
            Schedule {
                slot: Slot::Countdown,
                steps: vec![(1.0, Cue::Countdown(2)), (2.0, Cue::Countdown(1)), (3.0, Cue::Converge)],
            },
        ],
        Cue::Countdown(n) => vec![retarget(glyph(&n.to_string(), GlyphStyle::Numeric), RateSpec::Keep)],
        Cue::Converge => vec![
            retarget(Target::Point(Vec3::ZERO), CONVERGE_RATE),
            PointSize(CONVERGE_SIZE),
            Schedule {
                slot: Slot::Finale,
                steps: vec![
                    (BURST_DELAY, Cue::Burst),
                    (SCATTER_DELAY, Cue::Scatter),
                    (FINALE_END, Cue::FireworksDone),
                ],
            },
        ],
        Cue::Burst => vec![
            PointSize(BURST_SIZE),
            Recolor(Palette::FireworkMix),
            retarget(Target::Shell(BURST_SHELL), BURST_RATE),
            Sound(crate::events::Sound::Pop),
        ],
        Cue::Scatter => vec![
            PointSize(SCATTER_SIZE),
            retarget(Target::Shell(scatter_shell()), SCATTER_RATE),
        ],
        Cue::FireworksDone => {
            let mut commands = vec![PointSize(ViewState::DEFAULT_POINT_SIZE)];
            commands.extend(cross_fade(Overlay::Particles, Overlay::Cake));
            commands.extend([
                Ui(UiEvent::Meter(0.0)),
                retarget(Target::Shape(ShapeKind::Cake), CAKE_RATE),
                Recolor(Palette::CakeBands),
                AutoRotate(Some(CAKE_ROTATE)),
            ]);
            let meter = BlowMeter::new(config.blow_step, config.blow_decay);
            return (Stage::Cake { meter }, commands);
        }
        other => {
            log::debug!("{:?} ignored in heart", other);
            Vec::new()
        }
    };
    (stage, commands)
}

fn extinguish() -> Vec<Command> {
    use Command::*;
    vec![
        Cancel(Slot::Blow),
        Ui(UiEvent::Meter(FULL)),
        AutoRotate(None),
        Sound(crate::events::Sound::Pop),
        retarget(Target::Blast, BLAST_RATE),
        Schedule { slot: Slot::Presentation, steps: vec![(CANDLE_OUT_DELAY, Cue::CandleOut)] },
    ]
}

/// Hide the old overlay now, show the new one once the fade has run.
fn cross_fade(from: Overlay, to: Overlay) -> Vec<Command> {
    vec![
        Command::Ui(UiEvent::HideOverlay(from)),
        Command::Schedule { slot: Slot::Overlay, steps: vec![(CROSS_FADE, Cue::Reveal(to))] },
    ]
}

fn type_next(letter: &mut Typewriter) -> Vec<Command> {
    match letter.next() {
        Some(LetterStep::Char(c)) => vec![Command::Ui(UiEvent::LetterChar(c))],
        Some(LetterStep::Break) => vec![Command::Ui(UiEvent::LetterBreak)],
        None => Vec::new(),
    }
}

fn retarget(target: Target, rate: RateSpec) -> Command {
    Command::Retarget { target, rate }
}

fn glyph(text: &str, style: GlyphStyle) -> Target {
    Target::Glyph { text: text.to_owned(), style }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> SceneMachine {
        SceneMachine::new(CardConfig::default())
    }

    fn has(commands: &[Command], wanted: &Command) -> bool {
        commands.iter().any(|c| c == wanted)
    }

    fn scheduled(commands: &[Command], slot: Slot) -> Vec<(f32, Cue)> {
        commands
            .iter()
            .find_map(|c| match c {
                Command::Schedule { slot: s, steps } if *s == slot => Some(steps.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Drive the machine through the heart stage up to the cake.
    fn to_cake(m: &mut SceneMachine) {
        m.handle(Trigger::Click(Overlay::Start));
        m.handle(Trigger::Click(Overlay::Intro));
        m.handle(Trigger::Click(Overlay::Particles));
        m.handle(Trigger::Cue(Cue::FireworksDone));
    }

    #[test]
    fn start_click_enters_intro() {
        let mut m = machine();
        let commands = m.handle(Trigger::Click(Overlay::Start));
        assert_eq!(m.stage(), &Stage::Intro);
        assert!(has(&commands, &Command::Sound(Sound::Music)));
        assert!(has(&commands, &retarget(Target::Shape(ShapeKind::Cloud), RateSpec::Keep)));
        assert!(has(&commands, &Command::AutoRotate(Some(0.5))));
        assert!(!has(&commands, &Command::StartEasing));
        assert_eq!(scheduled(&commands, Slot::Overlay), vec![(0.5, Cue::Reveal(Overlay::Intro))]);
        assert_eq!(scheduled(&commands, Slot::Start), vec![(1.0, Cue::Dismiss(Overlay::Start))]);
    }

    #[test]
    fn clicks_outside_the_active_region_do_nothing() {
        let mut m = machine();
        assert!(m.handle(Trigger::Click(Overlay::Intro)).is_empty());
        assert_eq!(m.stage(), &Stage::Idle);
        m.handle(Trigger::Click(Overlay::Start));
        assert!(m.handle(Trigger::Click(Overlay::Start)).is_empty());
        assert!(m.handle(Trigger::Click(Overlay::Cake)).is_empty());
        assert_eq!(m.stage(), &Stage::Intro);
    }

    #[test]
    fn intro_click_enters_heart() {
        let mut m = machine();
        m.handle(Trigger::Click(Overlay::Start));
        let commands = m.handle(Trigger::Click(Overlay::Intro));
        assert_eq!(m.stage(), &Stage::Heart { wished: false });
        assert_eq!(commands[0], Command::Ui(UiEvent::HideOverlay(Overlay::Intro)));
        assert_eq!(scheduled(&commands, Slot::Overlay), vec![(0.5, Cue::Reveal(Overlay::Particles))]);
        assert!(has(&commands, &Command::StartEasing));
        assert!(has(&commands, &Command::Recolor(Palette::Uniform(palette::HEART_PINK))));
        assert!(has(&commands, &Command::AutoRotate(Some(4.0))));
        assert!(has(&commands, &Command::Ui(UiEvent::Hint(hints::MAKE_A_WISH))));
    }

    #[test]
    fn second_heart_click_is_a_no_op() {
        let mut m = machine();
        m.handle(Trigger::Click(Overlay::Start));
        m.handle(Trigger::Click(Overlay::Intro));

        let first = m.handle(Trigger::Click(Overlay::Particles));
        assert_eq!(m.stage(), &Stage::Heart { wished: true });
        assert!(has(&first, &retarget(glyph("HAPPY BIRTHDAY", GlyphStyle::Phrase), RateSpec::Keep)));
        assert!(has(&first, &Command::Recolor(Palette::Uniform(palette::WISH_GOLD))));
        assert!(has(&first, &Command::AutoRotate(None)));
        assert!(has(
            &first,
            &Command::Repeat { slot: Slot::Wish, interval: 0.4, cue: Cue::WishFireworks }
        ));
        assert_eq!(scheduled(&first, Slot::Countdown), vec![(5.0, Cue::BeginCountdown)]);

        assert!(m.handle(Trigger::Click(Overlay::Particles)).is_empty());
        assert_eq!(m.stage(), &Stage::Heart { wished: true });
    }

    #[test]
    fn finale_cues_need_a_wish() {
        let mut m = machine();
        m.handle(Trigger::Click(Overlay::Start));
        m.handle(Trigger::Click(Overlay::Intro));
        assert!(m.handle(Trigger::Cue(Cue::FireworksDone)).is_empty());
        assert_eq!(m.stage(), &Stage::Heart { wished: false });
    }

    #[test]
    fn wish_fireworks_fire_left_and_right() {
        let mut m = machine();
        m.handle(Trigger::Click(Overlay::Start));
        m.handle(Trigger::Click(Overlay::Intro));
        m.handle(Trigger::Click(Overlay::Particles));
        let commands = m.handle(Trigger::Cue(Cue::WishFireworks));
        assert_eq!(
            commands,
            vec![Command::SpawnFirework { bias: -60.0 }, Command::SpawnFirework { bias: 60.0 }]
        );
    }

    #[test]
    fn countdown_and_finale() {
        let mut m = machine();
        m.handle(Trigger::Click(Overlay::Start));
        m.handle(Trigger::Click(Overlay::Intro));
        m.handle(Trigger::Click(Overlay::Particles));

        let begin = m.handle(Trigger::Cue(Cue::BeginCountdown));
        assert_eq!(begin[0], Command::Cancel(Slot::Wish));
        assert!(has(&begin, &Command::Recolor(Palette::Uniform(palette::COUNTDOWN_WHITE))));
        assert!(has(&begin, &retarget(glyph("3", GlyphStyle::Numeric), RateSpec::Keep)));
        assert_eq!(
            scheduled(&begin, Slot::Countdown),
            vec![(1.0, Cue::Countdown(2)), (2.0, Cue::Countdown(1)), (3.0, Cue::Converge)]
        );

        let two = m.handle(Trigger::Cue(Cue::Countdown(2)));
        assert_eq!(two, vec![retarget(glyph("2", GlyphStyle::Numeric), RateSpec::Keep)]);

        let converge = m.handle(Trigger::Cue(Cue::Converge));
        assert!(has(&converge, &retarget(Target::Point(Vec3::ZERO), RateSpec::Fixed(0.1))));
        assert!(has(&converge, &Command::PointSize(2.0)));
        assert_eq!(
            scheduled(&converge, Slot::Finale),
            vec![(1.0, Cue::Burst), (2.8, Cue::Scatter), (6.0, Cue::FireworksDone)]
        );

        let burst = m.handle(Trigger::Cue(Cue::Burst));
        assert!(has(&burst, &Command::PointSize(4.0)));
        assert!(has(&burst, &Command::Recolor(Palette::FireworkMix)));
        assert!(has(&burst, &Command::Sound(Sound::Pop)));

        let scatter = m.handle(Trigger::Cue(Cue::Scatter));
        assert!(has(&scatter, &Command::PointSize(1.5)));
        assert!(has(&scatter, &retarget(Target::Shell(scatter_shell()), RateSpec::banded(0.02, 0.02))));
        assert_eq!(m.stage(), &Stage::Heart { wished: true });

        let done = m.handle(Trigger::Cue(Cue::FireworksDone));
        assert!(matches!(m.stage(), Stage::Cake { meter } if meter.level() == 0.0));
        assert_eq!(done[0], Command::PointSize(0.8));
        assert!(has(&done, &Command::Ui(UiEvent::HideOverlay(Overlay::Particles))));
        assert!(has(&done, &Command::Recolor(Palette::CakeBands)));
        assert!(has(&done, &retarget(Target::Shape(ShapeKind::Cake), RateSpec::banded(0.02, 0.01))));
        assert!(has(&done, &Command::AutoRotate(Some(2.0))));
    }

    #[test]
    fn blowing_fills_meter_then_candle_goes_out_once() {
        let mut m = machine();
        to_cake(&mut m);

        let press = m.handle(Trigger::PressStart(Overlay::Cake));
        assert_eq!(press, vec![Command::Repeat { slot: Slot::Blow, interval: 0.05, cue: Cue::BlowTick }]);
        // Holding again does not start a second timer.
        assert!(m.handle(Trigger::PressStart(Overlay::Cake)).is_empty());

        for i in 1..25 {
            let tick = m.handle(Trigger::Cue(Cue::BlowTick));
            assert_eq!(tick, vec![Command::Ui(UiEvent::Meter(i as f32 * 4.0))]);
        }
        let out = m.handle(Trigger::Cue(Cue::BlowTick));
        assert_eq!(out[0], Command::Cancel(Slot::Blow));
        assert!(has(&out, &Command::Ui(UiEvent::Meter(100.0))));
        assert!(has(&out, &Command::Sound(Sound::Pop)));
        assert!(has(&out, &retarget(Target::Blast, RateSpec::banded(0.005, 0.005))));
        assert_eq!(scheduled(&out, Slot::Presentation), vec![(0.8, Cue::CandleOut)]);

        // A stray tick after the candle is out only stops the timer.
        assert_eq!(m.handle(Trigger::Cue(Cue::BlowTick)), vec![Command::Cancel(Slot::Blow)]);
        assert!(m.handle(Trigger::PressStart(Overlay::Cake)).is_empty());
        assert!(matches!(m.stage(), Stage::Cake { meter } if meter.is_extinguished()));
    }

    #[test]
    fn release_stops_the_timer() {
        let mut m = machine();
        to_cake(&mut m);
        m.handle(Trigger::PressStart(Overlay::Cake));
        m.handle(Trigger::Cue(Cue::BlowTick));
        assert_eq!(m.handle(Trigger::PressEnd(Overlay::Cake)), vec![Command::Cancel(Slot::Blow)]);
        assert!(matches!(m.stage(), Stage::Cake { meter } if meter.level() == 4.0));
    }

    #[test]
    fn candle_out_needs_extinguished_candle() {
        let mut m = machine();
        to_cake(&mut m);
        assert!(m.handle(Trigger::Cue(Cue::CandleOut)).is_empty());
        assert_eq!(m.stage().name(), "cake");
    }

    #[test]
    fn letter_opens_once_and_types() {
        let config = CardConfig { letter_text: "Hi\nA".to_owned(), blow_step: 50.0, ..CardConfig::default() };
        let mut m = SceneMachine::new(config);
        to_cake(&mut m);
        m.handle(Trigger::PressStart(Overlay::Cake));
        m.handle(Trigger::Cue(Cue::BlowTick));
        m.handle(Trigger::Cue(Cue::BlowTick));

        let enter = m.handle(Trigger::Cue(Cue::CandleOut));
        assert_eq!(m.stage().name(), "letter");
        assert!(has(&enter, &Command::Sound(Sound::Song)));
        assert!(has(&enter, &Command::Blur));
        assert_eq!(scheduled(&enter, Slot::Presentation), vec![(0.6, Cue::CardPop)]);
        assert_eq!(scheduled(&enter, Slot::Overlay), vec![(0.5, Cue::Reveal(Overlay::Letter))]);

        assert_eq!(m.handle(Trigger::Cue(Cue::CardPop)), vec![Command::Ui(UiEvent::CardPop)]);

        let open = m.handle(Trigger::Click(Overlay::Letter));
        assert_eq!(open[0], Command::Ui(UiEvent::OpenCard));
        assert_eq!(scheduled(&open, Slot::Letter), vec![(0.5, Cue::OpenLetter)]);
        assert!(m.handle(Trigger::Click(Overlay::Letter)).is_empty());

        let first = m.handle(Trigger::Cue(Cue::OpenLetter));
        assert_eq!(first[0], Command::Ui(UiEvent::LetterChar('H')));
        assert!(has(&first, &Command::Repeat { slot: Slot::Letter, interval: 0.1, cue: Cue::LetterTick }));

        assert_eq!(m.handle(Trigger::Cue(Cue::LetterTick)), vec![Command::Ui(UiEvent::LetterChar('i'))]);
        assert_eq!(m.handle(Trigger::Cue(Cue::LetterTick)), vec![Command::Ui(UiEvent::LetterBreak)]);
        assert_eq!(
            m.handle(Trigger::Cue(Cue::LetterTick)),
            vec![Command::Ui(UiEvent::LetterChar('A')), Command::Cancel(Slot::Letter)]
        );
    }

    #[test]
    fn overlay_cues_work_in_any_stage() {
        let mut m = machine();
        assert_eq!(
            m.handle(Trigger::Cue(Cue::Dismiss(Overlay::Start))),
            vec![Command::Ui(UiEvent::HideOverlay(Overlay::Start))]
        );
        to_cake(&mut m);
        assert_eq!(
            m.handle(Trigger::Cue(Cue::Reveal(Overlay::Cake))),
            vec![Command::Ui(UiEvent::ShowOverlay(Overlay::Cake))]
        );
    }

    #[test]
    fn flow_only_moves_forward() {
        let mut m = machine();
        let mut seen = vec![m.stage().name()];
        let script = [
            Trigger::Click(Overlay::Start),
            Trigger::Click(Overlay::Intro),
            Trigger::Click(Overlay::Particles),
            Trigger::Cue(Cue::FireworksDone),
        ];
        for trigger in script {
            m.handle(trigger);
            if seen.last() != Some(&m.stage().name()) {
                seen.push(m.stage().name());
            }
        }
        m.handle(Trigger::PressStart(Overlay::Cake));
        for _ in 0..25 {
            m.handle(Trigger::Cue(Cue::BlowTick));
        }
        m.handle(Trigger::Cue(Cue::CandleOut));
        seen.push(m.stage().name());
        assert_eq!(seen, vec!["idle", "intro", "heart", "cake", "letter"]);
    }
}
