use crate::consts::TICK_RATE;
use std::time::{Duration, Instant};

/// Fixed-rate tick gate layered over a display-refresh callback.
///
/// Each poll accounts the wall time since the previous poll and grants at
/// most one simulation tick. The sub-tick remainder carries over so the
/// average rate converges on the target, but a backlog larger than one
/// interval is dropped: under sustained slow frames the simulation falls
/// behind real time instead of fast-forwarding to catch up.
#[derive(Clone, Copy, Debug)]
pub struct FixedStepScheduler {
    interval: Duration,
    accumulator: Duration,
    last_poll: Option<Instant>,
}

impl Default for FixedStepScheduler {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}

impl FixedStepScheduler {
    #[must_use]
    pub fn new(ticks_per_second: f32) -> Self {
        assert!(ticks_per_second > 0.0, "tick rate must be positive");

        Self {
            interval: Duration::from_secs_f32(1.0 / ticks_per_second),
            accumulator: Duration::ZERO,
            last_poll: None,
        }
    }

    /// Returns true if the caller should run one simulation tick now.
    pub fn poll(&mut self, now: Instant) -> bool {
        let elapsed = match self.last_poll {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last_poll = Some(now);
        self.accumulator += elapsed;

        if self.accumulator < self.interval {
            return false;
        }

        self.accumulator -= self.interval;
        if self.accumulator >= self.interval {
            // More than a full tick behind: drop the backlog
            self.accumulator = Duration::ZERO;
        }
        true
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}
