//! # Tick sources and modular time arithmetic
//!
//! All countdowns in this crate measure time with a free-running millisecond counter which
//! wraps around after [Ticks::MAX]. The [TickSource] trait abstracts that counter, so the same
//! countdown code can run on top of a SysTick interrupt counter ([AtomicTicks]), a HAL function
//! ([FnTicks]) or the host clock (`StdTickSource`, requires the `std` feature).
//!
//! Deadlines are computed with wrapping arithmetic. Whether a deadline has been reached is
//! decided by an [ExpiryComparison].
use core::fmt::Debug;
use core::sync::atomic::{AtomicU32, Ordering};

use derive_new::new;
use num_enum::{IntoPrimitive, TryFromPrimitive};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "std")]
pub use std_mod::*;

/// Millisecond tick value. Wraps around after roughly 49.7 days.
pub type Ticks = u32;

pub const MILLIS_PER_SECOND: Ticks = 1000;

/// Converts seconds to ticks. Overflow wraps, like the tick counter itself.
#[inline]
pub const fn seconds_to_ticks(seconds: u32) -> Ticks {
    seconds.wrapping_mul(MILLIS_PER_SECOND)
}

/// Generic abstraction for a check/countdown timer.
pub trait Countdown: Debug {
    fn has_expired(&self) -> bool;
    /// Restart the countdown with the duration it was last started with.
    fn reset(&mut self);
}

/// Free-running millisecond counter which wraps around after [Ticks::MAX].
pub trait TickSource {
    fn millis(&self) -> Ticks;
}

impl<T: TickSource + ?Sized> TickSource for &T {
    #[inline]
    fn millis(&self) -> Ticks {
        (**self).millis()
    }
}

/// Adapter for plain millisecond functions, for example the `millis()` function of a HAL.
#[derive(new, Copy, Clone)]
pub struct FnTicks<F> {
    tick_fn: F,
}

impl<F> Debug for FnTicks<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnTicks").finish_non_exhaustive()
    }
}

impl<F: Fn() -> Ticks> TickSource for FnTicks<F> {
    #[inline]
    fn millis(&self) -> Ticks {
        (self.tick_fn)()
    }
}

/// Millisecond counter which can be placed inside a `static` and advanced from an interrupt
/// handler, for example the SysTick handler.
///
/// Only atomic loads and stores are used, so this also works on cores without atomic
/// read-modify-write instructions like the Cortex-M0. There must only be one writer.
///
/// ```
/// use tickdown::time::{AtomicTicks, TickSource};
///
/// static MILLIS: AtomicTicks = AtomicTicks::new();
///
/// // Inside the SysTick interrupt handler.
/// MILLIS.increment();
/// assert_eq!(MILLIS.millis(), 1);
/// ```
#[derive(Debug, Default)]
pub struct AtomicTicks(AtomicU32);

impl AtomicTicks {
    pub const fn new() -> Self {
        Self::new_with_value(0)
    }

    pub const fn new_with_value(ms: Ticks) -> Self {
        Self(AtomicU32::new(ms))
    }

    #[inline]
    pub fn increment(&self) {
        self.advance(1);
    }

    #[inline]
    pub fn advance(&self, ms: Ticks) {
        let current = self.0.load(Ordering::Relaxed);
        self.0.store(current.wrapping_add(ms), Ordering::Relaxed);
    }

    #[inline]
    pub fn set(&self, ms: Ticks) {
        self.0.store(ms, Ordering::Relaxed);
    }
}

impl TickSource for AtomicTicks {
    #[inline]
    fn millis(&self) -> Ticks {
        self.0.load(Ordering::Relaxed)
    }
}

/// Strategy used to decide whether the current tick value has reached a deadline.
#[derive(Debug, Copy, Clone, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ExpiryComparison {
    /// Plain `now >= deadline`. This is the default. Every duration up to
    /// [crate::config::MAX_DIRECT_SECONDS] is tracked correctly as long as the deadline does not
    /// wrap past [Ticks::MAX]. A deadline which wrapped is considered reached immediately.
    Direct = 0,
    /// The modular difference `now - deadline` is interpreted as a signed value. Correct
    /// across a wrap of the counter, as long as `now` and the deadline are less than `2^31`
    /// milliseconds apart. Durations above [crate::config::MAX_WRAP_AWARE_SECONDS] are reported
    /// as reached immediately, and an elapsed countdown appears running again `2^31`
    /// milliseconds after its deadline.
    WrapAware = 1,
}

impl Default for ExpiryComparison {
    fn default() -> Self {
        Self::Direct
    }
}

impl ExpiryComparison {
    #[inline]
    pub const fn is_reached(&self, now: Ticks, deadline: Ticks) -> bool {
        match self {
            ExpiryComparison::Direct => now >= deadline,
            ExpiryComparison::WrapAware => now.wrapping_sub(deadline) as i32 >= 0,
        }
    }

    /// Milliseconds left until the deadline, 0 if it was already reached.
    #[inline]
    pub const fn remaining_ms(&self, now: Ticks, deadline: Ticks) -> Ticks {
        if self.is_reached(now, deadline) {
            return 0;
        }
        deadline.wrapping_sub(now)
    }
}

#[cfg(feature = "std")]
pub mod std_mod {
    use super::*;

    /// Tick source based on the host clock. It counts the milliseconds since its creation,
    /// truncated to [Ticks] so it wraps just like an embedded counter.
    #[derive(Debug, Copy, Clone)]
    pub struct StdTickSource {
        start_time: std::time::Instant,
    }

    impl StdTickSource {
        pub fn new() -> Self {
            Self {
                start_time: std::time::Instant::now(),
            }
        }
    }

    impl Default for StdTickSource {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TickSource for StdTickSource {
        fn millis(&self) -> Ticks {
            self.start_time.elapsed().as_millis() as Ticks
        }
    }
}
