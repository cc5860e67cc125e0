//! Recurring tick source for the typing effect
//!
//! The session never owns a timer. The host arms a [`Ticker`] when typing
//! starts, asks it how many ticks are due on every loop iteration, and
//! feeds that many [`tick`](super::session::ConsoleSession::tick) calls to
//! the session. Time is always passed in, so tests never sleep.

use std::time::{Duration, Instant};

/// Reveal interval used by the portfolio terminal
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(20);

/// Fixed-interval ticker
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    /// Deadline of the next tick, `None` when cancelled
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        // A zero interval would make `due` spin forever
        let interval = interval.max(Duration::from_millis(1));
        Self {
            interval,
            next: None,
        }
    }

    #[allow(dead_code)]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start ticking; the first tick is due one interval after `now`.
    /// Re-arming an armed ticker keeps the existing schedule.
    pub fn arm(&mut self, now: Instant) {
        if self.next.is_none() {
            self.next = Some(now + self.interval);
        }
    }

    /// Stop ticking
    pub fn cancel(&mut self) {
        self.next = None;
    }

    #[allow(dead_code)]
    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// Time left until the next tick, `None` when not armed
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.next.map(|next| next.saturating_duration_since(now))
    }

    /// Number of ticks that have come due by `now`, consuming them
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next else {
            return 0;
        };

        let mut count = 0;
        while next <= now {
            count += 1;
            next += self.interval;
        }
        self.next = Some(next);
        count
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}
