// extensions/tween.rs
//
// Scalar tweens sampled at an elapsed time. Owners keep their own clock;
// a tween is just the curve.
//
// Usage:
//   let grow = Tween::new(1.0, 20.0, 2.0, Easing::QuadOut);
//   let scale = grow.value(age);

use super::easing::{ease, Easing};

/// One animated scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Duration in seconds, not counting the delay.
    pub duration: f32,
    /// Seconds to hold `from` before starting.
    pub delay: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self { from, to, duration, delay: 0.0, easing }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Normalized progress [0, 1] at `elapsed` seconds.
    pub fn progress(&self, elapsed: f32) -> f32 {
        let t = elapsed - self.delay;
        if t <= 0.0 {
            0.0
        } else if self.duration <= 0.0 {
            1.0
        } else {
            (t / self.duration).min(1.0)
        }
    }

    /// Eased value at `elapsed` seconds.
    pub fn value(&self, elapsed: f32) -> f32 {
        ease(self.from, self.to, self.progress(elapsed), self.easing)
    }

    /// Delay plus duration.
    pub fn end(&self) -> f32 {
        self.delay + self.duration.max(0.0)
    }

    pub fn is_complete(&self, elapsed: f32) -> bool {
        elapsed >= self.end()
    }
}
