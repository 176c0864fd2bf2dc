//! # Polling countdown
//!
//! The [PollingCountdown] is the flavour where the user periodically asks whether the countdown
//! has elapsed. It also allows adding or removing seconds from a running countdown.
//!
//! ```
//! use tickdown::polling::PollingCountdown;
//! use tickdown::time::AtomicTicks;
//!
//! let ticks = AtomicTicks::new_with_value(1000);
//! let mut countdown = PollingCountdown::new(&ticks);
//! countdown.start(5);
//! assert_eq!(countdown.deadline(), 6000);
//!
//! ticks.set(3000);
//! assert_eq!(countdown.elapsed_seconds(), 3);
//! ticks.set(5999);
//! assert!(!countdown.is_elapsed());
//! ticks.set(6000);
//! assert!(countdown.is_elapsed());
//! ```
use core::fmt::Debug;

use delegate::delegate;

use crate::config::CountdownConfig;
use crate::countdown::CountdownCore;
use crate::time::{seconds_to_ticks, Countdown, ExpiryComparison, TickSource, Ticks};

/// Countdown which is checked by calling [Self::is_elapsed].
///
/// Once elapsed, the countdown stays elapsed until it is stopped or started again.
#[derive(Debug)]
pub struct PollingCountdown<T> {
    ticks: T,
    core: CountdownCore,
}

impl<T: TickSource> PollingCountdown<T> {
    pub fn new(ticks: T) -> Self {
        Self::with_comparison(ticks, ExpiryComparison::default())
    }

    pub fn with_comparison(ticks: T, comparison: ExpiryComparison) -> Self {
        Self {
            ticks,
            core: CountdownCore::new(comparison),
        }
    }

    /// The configured duration is only stored. It is used when the countdown is
    /// [reset][Countdown::reset].
    pub fn from_config(ticks: T, config: &CountdownConfig) -> Self {
        let mut countdown = Self::with_comparison(ticks, config.comparison);
        countdown.core.set_duration_secs(config.duration_secs);
        countdown
    }

    /// Starts the countdown, overwriting any previous deadline.
    pub fn start(&mut self, seconds: u32) {
        self.core.start(self.ticks.millis(), seconds);
    }

    pub fn stop(&mut self) {
        self.core.stop();
    }

    pub fn is_elapsed(&self) -> bool {
        self.core.is_elapsed(self.ticks.millis())
    }

    /// Whole seconds *remaining* until the deadline. The name is historical.
    ///
    /// Returns 0 if the countdown is not running or has already elapsed.
    pub fn elapsed_seconds(&self) -> u32 {
        self.core.remaining_secs(self.ticks.millis())
    }

    /// Extends the deadline. This also works when the countdown is stopped.
    pub fn add_seconds(&mut self, seconds: u32) {
        self.core.extend_ms(seconds_to_ticks(seconds));
    }

    /// Shortens the remaining duration.
    ///
    /// If no more than `seconds` are remaining, the deadline is set to the current time so a
    /// running countdown is elapsed immediately.
    pub fn remove_seconds(&mut self, seconds: u32) {
        if self.elapsed_seconds() > seconds {
            self.core.shorten_ms(seconds_to_ticks(seconds));
        } else {
            self.core.set_deadline(self.ticks.millis());
        }
    }

    delegate! {
        to self.core {
            pub fn is_running(&self) -> bool;
            pub fn deadline(&self) -> Ticks;
            pub fn comparison(&self) -> ExpiryComparison;
        }
    }

    pub fn tick_source(&self) -> &T {
        &self.ticks
    }

    pub fn core(&self) -> &CountdownCore {
        &self.core
    }
}

impl<T: TickSource + Debug> Countdown for PollingCountdown<T> {
    fn has_expired(&self) -> bool {
        self.is_elapsed()
    }

    fn reset(&mut self) {
        self.core.restart(self.ticks.millis());
    }
}
