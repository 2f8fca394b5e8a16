/// Fixed timestep accumulator with a running session clock.
///
/// Scene logic and particle easing run at a consistent rate regardless of frame
/// time. `elapsed` only advances by whole fixed steps, so the breathing
/// oscillation stays in lockstep with the easing ticks.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Seconds simulated since the session started.
    elapsed: f64,
}

impl FixedTimestep {
    /// Frame time beyond this many steps is dropped.
    pub const MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            elapsed: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * Self::MAX_STEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Advance the session clock by one fixed step and return the new time in seconds.
    pub fn advance(&mut self) -> f64 {
        self.elapsed += self.dt as f64;
        self.elapsed
    }

    /// Seconds simulated so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
