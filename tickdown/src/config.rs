//! Configuration of a countdown, usually loaded from a configuration file by the application.
use num_enum::{IntoPrimitive, TryFromPrimitive};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::time::{ExpiryComparison, MILLIS_PER_SECOND};

/// Largest duration which can still be resolved by [ExpiryComparison::WrapAware].
pub const MAX_WRAP_AWARE_SECONDS: u32 = i32::MAX as u32 / MILLIS_PER_SECOND;

/// Largest duration whose tick value does not overflow the tick counter.
pub const MAX_DIRECT_SECONDS: u32 = u32::MAX / MILLIS_PER_SECOND;

/// Selects between the two countdown flavours.
#[derive(Debug, Copy, Clone, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CountdownMode {
    /// The user checks [crate::polling::PollingCountdown::is_elapsed].
    Polling = 0,
    /// The user calls [crate::notify::NotifyCountdown::poll] periodically, which invokes the
    /// finished callback.
    Notify = 1,
}

impl Default for CountdownMode {
    fn default() -> Self {
        Self::Polling
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("duration of {seconds} s exceeds the wrap window of {max} s")]
    DurationExceedsWrapWindow { seconds: u32, max: u32 },
    #[error("duration of {seconds} s overflows the tick counter, maximum is {max} s")]
    DurationOverflow { seconds: u32, max: u32 },
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CountdownConfig {
    pub mode: CountdownMode,
    pub comparison: ExpiryComparison,
    pub duration_secs: u32,
}

impl CountdownConfig {
    pub const fn new(
        mode: CountdownMode,
        comparison: ExpiryComparison,
        duration_secs: u32,
    ) -> Self {
        Self {
            mode,
            comparison,
            duration_secs,
        }
    }

    /// Checks that the configured duration can be tracked correctly with the configured
    /// comparison.
    ///
    /// The countdowns themselves accept any duration and use modular arithmetic. This check is
    /// intended for durations coming from external input.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.comparison {
            ExpiryComparison::WrapAware if self.duration_secs > MAX_WRAP_AWARE_SECONDS => {
                Err(ConfigError::DurationExceedsWrapWindow {
                    seconds: self.duration_secs,
                    max: MAX_WRAP_AWARE_SECONDS,
                })
            }
            ExpiryComparison::Direct if self.duration_secs > MAX_DIRECT_SECONDS => {
                Err(ConfigError::DurationOverflow {
                    seconds: self.duration_secs,
                    max: MAX_DIRECT_SECONDS,
                })
            }
            _ => Ok(()),
        }
    }
}
