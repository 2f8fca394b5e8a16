// extensions/sequencer.rs
//
// Deferred and repeating actions on the fixed-step clock.
//
// Usage:
//   let mut seq = Sequencer::new();
//   let id = seq.schedule([(0.0, Cue::Three), (1.0, Cue::Two), (2.0, Cue::One)]);
//   for cue in seq.tick(dt) { ... }
//   seq.cancel(id);

use std::collections::BTreeMap;

/// Cancel handle for everything scheduled by one `schedule` or `repeat` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceId(pub u32);

#[derive(Debug, Clone)]
struct Step<A> {
    id: SequenceId,
    action: A,
    /// Re-arm interval in microseconds for repeating steps.
    every: Option<u64>,
}

/// Timeline of pending actions keyed by (due time, insertion order).
///
/// Time is kept in whole microseconds so ordering is exact and ties resolve
/// by scheduling order.
#[derive(Debug, Clone)]
pub struct Sequencer<A> {
    now: u64,
    order: u64,
    next_id: u32,
    pending: BTreeMap<(u64, u64), Step<A>>,
}

impl<A> Default for Sequencer<A> {
    fn default() -> Self {
        Self { now: 0, order: 0, next_id: 0, pending: BTreeMap::new() }
    }
}

fn micros(seconds: f32) -> u64 {
    (seconds.max(0.0) as f64 * 1_000_000.0).round() as u64
}

impl<A: Clone> Sequencer<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `(delay, action)` steps. Each delay counts from now, not from the
    /// previous step.
    pub fn schedule<I>(&mut self, steps: I) -> SequenceId
    where
        I: IntoIterator<Item = (f32, A)>,
    {
        let id = self.allocate();
        for (delay, action) in steps {
            let due = self.now + micros(delay);
            self.insert(due, Step { id, action, every: None });
        }
        log::debug!("sequence {} scheduled, {} pending", id.0, self.pending.len());
        id
    }

    /// Fire `action` every `interval` seconds, first after one interval.
    pub fn repeat(&mut self, interval: f32, action: A) -> SequenceId {
        let id = self.allocate();
        let every = micros(interval).max(1);
        self.insert(self.now + every, Step { id, action, every: Some(every) });
        log::debug!("sequence {} repeating every {}s", id.0, interval);
        id
    }

    /// Drop every pending step of `id`. Returns whether anything was pending.
    pub fn cancel(&mut self, id: SequenceId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|_, step| step.id != id);
        before != self.pending.len()
    }

    pub fn is_active(&self, id: SequenceId) -> bool {
        self.pending.values().any(|step| step.id == id)
    }

    /// Advance the clock by `dt` seconds and return the actions that came due,
    /// ordered by due time then by scheduling order.
    pub fn tick(&mut self, dt: f32) -> Vec<A> {
        self.now += micros(dt);
        let mut due = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            let ((at, _), step) = entry.remove_entry();
            if let Some(every) = step.every {
                self.insert(at + every, step.clone());
            }
            due.push(step.action);
        }
        due
    }

    /// Seconds since the sequencer was created.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn allocate(&mut self) -> SequenceId {
        let id = SequenceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn insert(&mut self, due: u64, step: Step<A>) {
        self.pending.insert((due, self.order), step);
        self.order += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_fire_at_their_offsets() {
        let mut seq = Sequencer::new();
        seq.schedule([(0.0, 3), (1.0, 2), (2.0, 1)]);

        assert_eq!(seq.tick(0.0), vec![3]);
        assert!(seq.tick(0.5).is_empty());
        assert_eq!(seq.tick(0.5), vec![2]);
        assert_eq!(seq.tick(5.0), vec![1]);
        assert!(seq.is_empty());
    }

    #[test]
    fn ties_keep_scheduling_order() {
        let mut seq = Sequencer::new();
        seq.schedule([(1.0, "a"), (0.5, "b")]);
        seq.schedule([(0.5, "c"), (1.0, "d")]);
        assert_eq!(seq.tick(2.0), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn cancelled_steps_never_fire() {
        let mut seq = Sequencer::new();
        let keep = seq.schedule([(1.0, 1)]);
        let drop = seq.schedule([(0.5, 2), (1.5, 3)]);
        assert!(seq.cancel(drop));
        assert!(!seq.cancel(drop));
        assert!(!seq.is_active(drop));
        assert!(seq.is_active(keep));
        assert_eq!(seq.tick(10.0), vec![1]);
    }

    #[test]
    fn repeat_rearms_until_cancelled() {
        let mut seq = Sequencer::new();
        let id = seq.repeat(0.4, 'x');
        assert!(seq.tick(0.3).is_empty());
        assert_eq!(seq.tick(0.1), vec!['x']);
        // A long frame catches up on every missed interval.
        assert_eq!(seq.tick(1.2).len(), 3);
        seq.cancel(id);
        assert!(seq.tick(10.0).is_empty());
    }

    #[test]
    fn fixed_steps_do_not_drift() {
        let mut seq = Sequencer::new();
        seq.schedule([(5.0, ())]);
        let dt = 1.0 / 60.0;
        let mut frames = 0;
        while seq.tick(dt).is_empty() {
            frames += 1;
            assert!(frames < 400);
        }
        assert!((299..=300).contains(&frames), "fired after {} frames", frames);
    }
}
