use std::time::Duration;
use std::time::Instant;

/// Gates generation advances to at most one per `timestep`.
///
/// This is not an accumulator: time left over past the threshold is dropped when the clock is
/// reset, so a slow frame delays every following step rather than being caught up on.
#[derive(Clone, Copy, Debug)]
pub struct SimulationClock {
    timestep: Duration,
    last: Instant,
}

impl SimulationClock {
    pub fn new(timestep: Duration, now: Instant) -> Self {
        Self {
            timestep,
            last: now,
        }
    }

    pub fn timestep(&self) -> Duration {
        self.timestep
    }

    /// Time elapsed since the last advance
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last)
    }

    /// Whether strictly more than `timestep` has elapsed since the last reset
    pub fn ready(&self, now: Instant) -> bool {
        self.elapsed(now) > self.timestep
    }

    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }

    /// Resets the clock and returns `true` if it was [`ready`](Self::ready)
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.ready(now) {
            return false;
        }

        self.reset(now);
        true
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;
    use std::time::Instant;

    use super::SimulationClock;

    const STEP: Duration = Duration::from_millis(100);

    #[test]
    fn threshold_is_strict() {
        let t0 = Instant::now();
        let clock = SimulationClock::new(STEP, t0);

        assert!(!clock.ready(t0 + STEP));
        assert!(clock.ready(t0 + STEP + Duration::from_millis(1)));
    }

    #[test]
    fn leftover_time_is_not_carried() {
        let t0 = Instant::now();
        let mut clock = SimulationClock::new(STEP, t0);

        // a frame that took 2.5 steps only yields one advance
        let late = t0 + STEP * 5 / 2;
        assert!(clock.tick(late));
        assert!(!clock.tick(late + Duration::from_millis(50)));
        assert!(!clock.tick(late + STEP));
        assert!(clock.tick(late + STEP + Duration::from_millis(1)));
    }
}
