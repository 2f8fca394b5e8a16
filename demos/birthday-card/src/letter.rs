/// Seconds between revealed characters.
pub const LETTER_TICK: f32 = 0.1;

/// One reveal step of the letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterStep {
    Char(char),
    Break,
}

/// Reveals a letter one character at a time; `\n` becomes a line break.
#[derive(Debug, Clone, PartialEq)]
pub struct Typewriter {
    chars: Vec<char>,
    pos: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().filter(|c| *c != '\r').collect(),
            pos: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Characters revealed so far.
    pub fn revealed(&self) -> usize {
        self.pos
    }
}

impl Iterator for Typewriter {
    type Item = LetterStep;

    fn next(&mut self) -> Option<LetterStep> {
        let c = *self.chars.get(self.pos)?;
        self.pos += 1;
        Some(if c == '\n' { LetterStep::Break } else { LetterStep::Char(c) })
    }
}
