/// Pointer input the engine forwards to the game.
/// Regions are game-defined ids for the clickable areas of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A click or tap landed on `region`.
    Click { region: u32 },
    /// A press-and-hold began on `region` (mouse down, touch start).
    PressStart { region: u32 },
    /// The hold on `region` ended (pointer up or pointer leave).
    PressEnd { region: u32 },
}

impl InputEvent {
    pub fn region(&self) -> u32 {
        match *self {
            InputEvent::Click { region }
            | InputEvent::PressStart { region }
            | InputEvent::PressEnd { region } => region,
        }
    }
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events in arrival order without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
