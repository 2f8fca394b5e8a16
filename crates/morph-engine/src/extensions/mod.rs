// extensions/mod.rs
//
// Optional timing helpers. Games opt in by owning these; the core loop
// does not drive them.

pub mod easing;
pub mod sequencer;
pub mod tween;

pub use easing::{Easing, ease, lerp};
pub use sequencer::{SequenceId, Sequencer};
pub use tween::Tween;
