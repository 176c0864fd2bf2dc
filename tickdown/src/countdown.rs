//! Time arithmetic and run state shared by all countdown flavours.
//!
//! [CountdownCore] does not own a tick source. Every operation which depends on the current time
//! receives the current tick value explicitly, which keeps it trivial to test and lets the
//! wrappers in [crate::polling] and [crate::notify] decide where the time comes from.
use crate::time::{seconds_to_ticks, ExpiryComparison, Ticks, MILLIS_PER_SECOND};

/// Deadline, run flag and expiry comparison of a single countdown.
///
/// The deadline is only meaningful while the countdown is running. It starts out as
/// [Ticks::MAX].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CountdownCore {
    deadline: Ticks,
    running: bool,
    duration_ms: Ticks,
    comparison: ExpiryComparison,
}

impl Default for CountdownCore {
    fn default() -> Self {
        Self::new(ExpiryComparison::default())
    }
}

impl CountdownCore {
    pub const fn new(comparison: ExpiryComparison) -> Self {
        Self {
            deadline: Ticks::MAX,
            running: false,
            duration_ms: 0,
            comparison,
        }
    }

    /// Unconditionally overwrites any previous deadline.
    pub fn start(&mut self, now: Ticks, seconds: u32) {
        self.running = true;
        self.update(now, seconds);
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Re-schedules the deadline relative to `now` without touching the run flag.
    pub fn update(&mut self, now: Ticks, seconds: u32) {
        self.duration_ms = seconds_to_ticks(seconds);
        self.deadline = now.wrapping_add(self.duration_ms);
    }

    /// Sets the duration used by [Self::restart] without touching deadline or run flag.
    pub fn set_duration_secs(&mut self, seconds: u32) {
        self.duration_ms = seconds_to_ticks(seconds);
    }

    /// Starts the countdown again with the most recently used duration.
    pub fn restart(&mut self, now: Ticks) {
        self.running = true;
        self.deadline = now.wrapping_add(self.duration_ms);
    }

    /// Pushes the deadline `ms` later, regardless of the run state.
    pub fn extend_ms(&mut self, ms: Ticks) {
        self.deadline = self.deadline.wrapping_add(ms);
    }

    /// Pulls the deadline `ms` earlier, regardless of the run state.
    pub fn shorten_ms(&mut self, ms: Ticks) {
        self.deadline = self.deadline.wrapping_sub(ms);
    }

    pub fn set_deadline(&mut self, deadline: Ticks) {
        self.deadline = deadline;
    }

    #[inline]
    pub fn is_elapsed(&self, now: Ticks) -> bool {
        self.running && self.comparison.is_reached(now, self.deadline)
    }

    /// Milliseconds left until the deadline. 0 if the countdown is not running or the deadline
    /// was reached.
    #[inline]
    pub fn remaining_ms(&self, now: Ticks) -> Ticks {
        if !self.running {
            return 0;
        }
        self.comparison.remaining_ms(now, self.deadline)
    }

    #[inline]
    pub fn remaining_secs(&self, now: Ticks) -> u32 {
        self.remaining_ms(now) / MILLIS_PER_SECOND
    }

    /// `deadline - now` without a run check and without saturation. Once the deadline has
    /// passed, the subtraction wraps and yields a value close to [Ticks::MAX].
    #[inline]
    pub fn raw_remaining_ms(&self, now: Ticks) -> Ticks {
        self.deadline.wrapping_sub(now)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn deadline(&self) -> Ticks {
        self.deadline
    }

    /// Duration passed to the last [Self::start], [Self::update] or [Self::set_duration_secs]
    /// call.
    #[inline]
    pub fn duration_ms(&self) -> Ticks {
        self.duration_ms
    }

    #[inline]
    pub fn comparison(&self) -> ExpiryComparison {
        self.comparison
    }
}
