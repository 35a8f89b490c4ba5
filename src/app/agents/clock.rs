use std::time::{Duration, Instant};

/// Monotonic time source, measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Turns wall time into a count of fixed-period ticks.
pub struct TickScheduler<C: Clock> {
    clock: C,
    period: Duration,
    last_tick: Option<Duration>,
}

impl<C: Clock> TickScheduler<C> {
    /// Ticks owed after a long stall are capped at this many.
    pub const MAX_CATCH_UP: u32 = 5;

    pub fn new(clock: C, period: Duration) -> Self {
        Self {
            clock,
            period: period.max(Duration::from_millis(1)),
            last_tick: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of whole periods elapsed since the previous tick. The first call
    /// only starts the schedule.
    pub fn due_ticks(&mut self) -> u32 {
        let now = self.clock.now();
        let Some(last_tick) = self.last_tick else {
            self.last_tick = Some(now);
            return 0;
        };

        let elapsed = now.saturating_sub(last_tick);
        let due = u32::try_from(elapsed.as_nanos() / self.period.as_nanos()).unwrap_or(u32::MAX);
        if due == 0 {
            return 0;
        }

        if due > Self::MAX_CATCH_UP {
            self.last_tick = Some(now);
            Self::MAX_CATCH_UP
        } else {
            self.last_tick = Some(last_tick + self.period * due);
            due
        }
    }

    /// Time left until the next tick falls due, for scheduling a repaint.
    pub fn until_next_tick(&self) -> Duration {
        match self.last_tick {
            Some(last_tick) => (last_tick + self.period).saturating_sub(self.clock.now()),
            None => Duration::ZERO,
        }
    }
}
