use bytemuck::{Pod, Zeroable};

/// A sound event emitted by the game logic.
/// The numeric value maps to a game-defined cue in the page's audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// A game event communicated from Rust to the page through the shared buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: u32, a: f32) -> Self {
        Self { kind: kind as f32, a, b: 0.0, c: 0.0 }
    }
}
