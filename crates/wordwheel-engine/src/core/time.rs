/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// One-shot timer driven by fixed-step deltas.
/// A zero-length countdown fires on its first tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    duration: f32,
    remaining: f32,
    done: bool,
}

impl Countdown {
    pub fn new(duration: f32) -> Self {
        let duration = duration.max(0.0);
        Self {
            duration,
            remaining: duration,
            done: false,
        }
    }

    /// Advance by `dt` seconds. Returns true on the tick that reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.done {
            return false;
        }
        self.remaining -= dt;
        self.done = self.remaining <= 0.0;
        self.done
    }

    pub fn is_finished(&self) -> bool {
        self.done
    }

    /// Elapsed fraction in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.done {
            return 1.0;
        }
        if self.duration <= 0.0 {
            return 0.0;
        }
        (1.0 - self.remaining / self.duration).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), 10);
    }

    #[test]
    fn countdown_fires_once() {
        let mut c = Countdown::new(0.5);
        assert!(!c.tick(0.2));
        assert!(!c.is_finished());
        assert!(c.tick(0.4));
        assert!(c.is_finished());
        assert!(!c.tick(0.1));
    }

    #[test]
    fn countdown_progress() {
        let mut c = Countdown::new(1.0);
        assert_eq!(c.progress(), 0.0);
        c.tick(0.25);
        assert!((c.progress() - 0.25).abs() < 1e-6);
        c.tick(5.0);
        assert_eq!(c.progress(), 1.0);
    }

    #[test]
    fn zero_countdown_fires_on_first_tick() {
        let mut c = Countdown::new(0.0);
        assert_eq!(c.progress(), 0.0);
        assert!(c.tick(0.0));
        assert!(c.is_finished());
        assert_eq!(c.progress(), 1.0);
    }
}
