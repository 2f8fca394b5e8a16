/// Seconds between meter updates while the timer runs.
pub const BLOW_TICK: f32 = 0.05;
/// Meter value that puts the candle out.
pub const FULL: f32 = 100.0;

/// What one timer tick did to the meter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlowTick {
    /// The meter moved and the timer keeps running.
    Level(f32),
    /// Decay drained the meter; stop the timer.
    Empty,
    /// The meter hit 100. Reported once.
    Full,
    /// Nothing to do; stop the timer.
    Stop,
}

/// Press-and-hold accumulator for blowing out the candle.
///
/// The meter is clamped to [0, 100]. Once full it stays extinguished and
/// ignores further input.
#[derive(Debug, Clone, PartialEq)]
pub struct BlowMeter {
    level: f32,
    pressing: bool,
    ticking: bool,
    extinguished: bool,
    step: f32,
    decay: f32,
}

impl BlowMeter {
    pub fn new(step: f32, decay: f32) -> Self {
        Self {
            level: 0.0,
            pressing: false,
            ticking: false,
            extinguished: false,
            step,
            decay,
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn is_pressing(&self) -> bool {
        self.pressing
    }

    pub fn is_extinguished(&self) -> bool {
        self.extinguished
    }

    /// Begin holding. Returns true when the tick timer has to be started.
    pub fn press(&mut self) -> bool {
        if self.extinguished {
            return false;
        }
        self.pressing = true;
        if self.ticking {
            false
        } else {
            self.ticking = true;
            true
        }
    }

    /// Stop holding. Returns true when the tick timer has to be stopped.
    ///
    /// Without decay the timer stops at once and the meter holds its level.
    pub fn release(&mut self) -> bool {
        self.pressing = false;
        if self.ticking && (self.decay <= 0.0 || self.level <= 0.0) {
            self.ticking = false;
            true
        } else {
            false
        }
    }

    pub fn tick(&mut self) -> BlowTick {
        if self.extinguished || !self.ticking {
            self.ticking = false;
            return BlowTick::Stop;
        }
        if self.pressing {
            self.level = (self.level + self.step).min(FULL);
            if self.level >= FULL {
                self.extinguished = true;
                self.pressing = false;
                self.ticking = false;
                return BlowTick::Full;
            }
            return BlowTick::Level(self.level);
        }
        if self.decay > 0.0 && self.level > 0.0 {
            self.level = (self.level - self.decay).max(0.0);
            if self.level <= 0.0 {
                self.ticking = false;
                return BlowTick::Empty;
            }
            return BlowTick::Level(self.level);
        }
        self.ticking = false;
        BlowTick::Stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rises_by_step_while_pressed() {
        let mut meter = BlowMeter::new(4.0, 0.0);
        assert_eq!(meter.level(), 0.0);
        assert!(meter.press());
        let mut prev = 0.0;
        for _ in 0..10 {
            match meter.tick() {
                BlowTick::Level(level) => {
                    assert_eq!(level, prev + 4.0);
                    prev = level;
                }
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn fills_after_25_ticks_exactly_once() {
        let mut meter = BlowMeter::new(4.0, 0.0);
        meter.press();
        let mut fulls = 0;
        for i in 0..40 {
            if meter.tick() == BlowTick::Full {
                fulls += 1;
                assert_eq!(i, 24);
            }
            assert!(meter.level() <= FULL);
        }
        assert_eq!(fulls, 1);
        assert!(meter.is_extinguished());
        assert!(!meter.press());
    }

    #[test]
    fn uneven_step_clamps_at_full() {
        let mut meter = BlowMeter::new(30.0, 0.0);
        meter.press();
        for _ in 0..3 {
            meter.tick();
        }
        assert_eq!(meter.tick(), BlowTick::Full);
        assert_eq!(meter.level(), FULL);
    }

    #[test]
    fn release_without_decay_holds_level() {
        let mut meter = BlowMeter::new(4.0, 0.0);
        meter.press();
        meter.tick();
        meter.tick();
        assert!(meter.release());
        assert_eq!(meter.level(), 8.0);
        assert_eq!(meter.tick(), BlowTick::Stop);
        assert_eq!(meter.level(), 8.0);
    }

    #[test]
    fn release_with_decay_drains() {
        let mut meter = BlowMeter::new(4.0, 2.0);
        meter.press();
        meter.tick();
        meter.tick();
        assert!(!meter.release());
        assert_eq!(meter.tick(), BlowTick::Level(6.0));
        assert_eq!(meter.tick(), BlowTick::Level(4.0));
        assert_eq!(meter.tick(), BlowTick::Level(2.0));
        assert_eq!(meter.tick(), BlowTick::Empty);
        assert_eq!(meter.level(), 0.0);
        // Pressing again restarts the timer.
        assert!(meter.press());
    }

    #[test]
    fn second_press_keeps_single_timer() {
        let mut meter = BlowMeter::new(4.0, 2.0);
        assert!(meter.press());
        meter.tick();
        meter.release();
        assert!(!meter.press());
    }
}
