use std::time::Instant;

/// Per-frame timing: tracks the timestamp of the previous frame and hands
/// out the elapsed delta, which scales all camera movement.
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Seconds since the previous tick; advances the clock.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        delta
    }

    /// Forget the time spent so far. Called once setup completes so the
    /// first frame does not inherit the load time as its delta.
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn tick_reports_elapsed_time() {
        let mut clock = FrameClock::new();

        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();

        assert!(delta >= 0.009, "delta {delta} too small");
        assert!(delta <= 0.5, "delta {delta} too large");
    }

    #[test]
    fn consecutive_ticks_measure_separate_intervals() {
        let mut clock = FrameClock::new();

        thread::sleep(Duration::from_millis(10));
        let first = clock.tick();
        let second = clock.tick();

        assert!(first >= 0.009);
        assert!(second < first);
    }

    #[test]
    fn reset_discards_accumulated_time() {
        let mut clock = FrameClock::new();

        thread::sleep(Duration::from_millis(10));
        clock.reset();

        assert!(clock.tick() < 0.005);
    }
}
