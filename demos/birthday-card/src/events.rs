//! Ids shared with the page: clickable regions, overlays, UI events, sounds.

use morph_engine::{GameEvent, SoundEvent};

/// Page overlays, one per scene. Also the clickable region ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    Start = 0,
    Intro = 1,
    Particles = 2,
    Cake = 3,
    Letter = 4,
}

impl Overlay {
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Overlay::Start),
            1 => Some(Overlay::Intro),
            2 => Some(Overlay::Particles),
            3 => Some(Overlay::Cake),
            4 => Some(Overlay::Letter),
            _ => None,
        }
    }

    pub fn id(self) -> u32 {
        self as u32
    }
}

/// Hint lines under the particle scene. 0 clears the hint.
pub mod hints {
    pub const CLEAR: u32 = 0;
    pub const MAKE_A_WISH: u32 = 1;
}

/// Game event kinds (Rust → page)
mod kinds {
    pub const SHOW_OVERLAY: u32 = 1;
    pub const HIDE_OVERLAY: u32 = 2;
    pub const HINT: u32 = 3;
    pub const METER: u32 = 4;
    pub const CARD_POP: u32 = 5;
    pub const OPEN_CARD: u32 = 6;
    pub const LETTER_CHAR: u32 = 7;
    pub const LETTER_BREAK: u32 = 8;
}

/// Presentation changes the page carries out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    ShowOverlay(Overlay),
    HideOverlay(Overlay),
    Hint(u32),
    /// Blow meter fill in percent.
    Meter(f32),
    CardPop,
    OpenCard,
    LetterChar(char),
    LetterBreak,
}

impl UiEvent {
    pub fn to_event(self) -> GameEvent {
        match self {
            UiEvent::ShowOverlay(o) => GameEvent::new(kinds::SHOW_OVERLAY, o.id() as f32),
            UiEvent::HideOverlay(o) => GameEvent::new(kinds::HIDE_OVERLAY, o.id() as f32),
            UiEvent::Hint(id) => GameEvent::new(kinds::HINT, id as f32),
            UiEvent::Meter(percent) => GameEvent::new(kinds::METER, percent),
            UiEvent::CardPop => GameEvent::new(kinds::CARD_POP, 0.0),
            UiEvent::OpenCard => GameEvent::new(kinds::OPEN_CARD, 0.0),
            // Codepoints stay exact as f32 up to 2^24, which covers the BMP.
            UiEvent::LetterChar(c) => GameEvent::new(kinds::LETTER_CHAR, c as u32 as f32),
            UiEvent::LetterBreak => GameEvent::new(kinds::LETTER_BREAK, 0.0),
        }
    }
}

/// Audio cues (Rust → page).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Start the background track.
    Music = 1,
    Pop = 2,
    /// Stop the background track and play the birthday song.
    Song = 3,
}

impl Sound {
    pub fn to_event(self) -> SoundEvent {
        SoundEvent(self as u32)
    }
}
