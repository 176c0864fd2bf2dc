//! # Notifying countdown
//!
//! The [NotifyCountdown] is bound to a [CountdownHandler] at construction time. The user calls
//! [NotifyCountdown::poll] periodically, which invokes [CountdownHandler::on_finished] while the
//! countdown is elapsed.
//!
//! The notification is level-triggered: polling does not stop the countdown, so the finished
//! callback fires on every poll after the deadline until the countdown is stopped or started
//! again.
//!
//! ```
//! use core::cell::Cell;
//! use tickdown::notify::{Callbacks, NotifyCountdown};
//! use tickdown::time::AtomicTicks;
//!
//! let ticks = AtomicTicks::new();
//! let finished = Cell::new(0);
//! let callbacks = Callbacks::none().with_finished(|| finished.set(finished.get() + 1));
//! let mut countdown = NotifyCountdown::new(&ticks, callbacks);
//!
//! countdown.start(1);
//! assert!(!countdown.poll());
//! ticks.set(1000);
//! if countdown.poll() {
//!     countdown.stop();
//! }
//! assert!(!countdown.poll());
//! assert_eq!(finished.get(), 1);
//! ```
use core::fmt::Debug;

use delegate::delegate;

use crate::config::CountdownConfig;
use crate::countdown::CountdownCore;
use crate::time::{Countdown, ExpiryComparison, TickSource, Ticks, MILLIS_PER_SECOND};

/// Receives the lifecycle notifications of a [NotifyCountdown].
///
/// All methods default to doing nothing, so implementors only provide what they need.
/// The handler is invoked synchronously from inside the countdown and can not call back into it.
pub trait CountdownHandler {
    fn on_finished(&self) {}
    fn on_start(&self) {}
    fn on_stop(&self) {}
}

impl<H: CountdownHandler + ?Sized> CountdownHandler for &H {
    fn on_finished(&self) {
        (**self).on_finished()
    }

    fn on_start(&self) {
        (**self).on_start()
    }

    fn on_stop(&self) {
        (**self).on_stop()
    }
}

/// [CountdownHandler] built from up to three closures, each of them optional.
///
/// The function pointer defaults for the type parameters are placeholders for callbacks which
/// were not set.
#[derive(Copy, Clone)]
pub struct Callbacks<Fin = fn(), Start = fn(), Stop = fn()> {
    finished: Option<Fin>,
    start: Option<Start>,
    stop: Option<Stop>,
}

#[cfg(feature = "alloc")]
pub type BoxedCallbacks = Callbacks<
    alloc::boxed::Box<dyn Fn()>,
    alloc::boxed::Box<dyn Fn()>,
    alloc::boxed::Box<dyn Fn()>,
>;

impl Callbacks {
    pub const fn none() -> Self {
        Self {
            finished: None,
            start: None,
            stop: None,
        }
    }
}

impl Default for Callbacks {
    fn default() -> Self {
        Self::none()
    }
}

impl<Fin, Start, Stop> Callbacks<Fin, Start, Stop> {
    pub fn with_finished<F: Fn()>(self, finished: F) -> Callbacks<F, Start, Stop> {
        Callbacks {
            finished: Some(finished),
            start: self.start,
            stop: self.stop,
        }
    }

    pub fn with_start<F: Fn()>(self, start: F) -> Callbacks<Fin, F, Stop> {
        Callbacks {
            finished: self.finished,
            start: Some(start),
            stop: self.stop,
        }
    }

    pub fn with_stop<F: Fn()>(self, stop: F) -> Callbacks<Fin, Start, F> {
        Callbacks {
            finished: self.finished,
            start: self.start,
            stop: Some(stop),
        }
    }
}

impl<Fin, Start, Stop> Debug for Callbacks<Fin, Start, Stop> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Callbacks")
            .field("finished", &self.finished.is_some())
            .field("start", &self.start.is_some())
            .field("stop", &self.stop.is_some())
            .finish()
    }
}

impl<Fin: Fn(), Start: Fn(), Stop: Fn()> CountdownHandler for Callbacks<Fin, Start, Stop> {
    fn on_finished(&self) {
        if let Some(finished) = &self.finished {
            finished();
        }
    }

    fn on_start(&self) {
        if let Some(start) = &self.start {
            start();
        }
    }

    fn on_stop(&self) {
        if let Some(stop) = &self.stop {
            stop();
        }
    }
}

/// Countdown which notifies its [CountdownHandler] on start, stop and while elapsed.
#[derive(Debug)]
pub struct NotifyCountdown<T, H> {
    ticks: T,
    handler: H,
    core: CountdownCore,
}

impl<T: TickSource, H: CountdownHandler> NotifyCountdown<T, H> {
    pub fn new(ticks: T, handler: H) -> Self {
        Self::with_comparison(ticks, handler, ExpiryComparison::default())
    }

    pub fn with_comparison(ticks: T, handler: H, comparison: ExpiryComparison) -> Self {
        Self {
            ticks,
            handler,
            core: CountdownCore::new(comparison),
        }
    }

    /// The configured duration is only stored. It is used when the countdown is
    /// [reset][Countdown::reset].
    pub fn from_config(ticks: T, handler: H, config: &CountdownConfig) -> Self {
        let mut countdown = Self::with_comparison(ticks, handler, config.comparison);
        countdown.core.set_duration_secs(config.duration_secs);
        countdown
    }

    /// Starts the countdown and notifies the handler afterwards.
    pub fn start(&mut self, seconds: u32) {
        self.core.start(self.ticks.millis(), seconds);
        self.handler.on_start();
    }

    /// Stops the countdown and notifies the handler afterwards, even if it was already stopped.
    pub fn stop(&mut self) {
        self.core.stop();
        self.handler.on_stop();
    }

    /// Invokes [CountdownHandler::on_finished] if the countdown is running and its deadline was
    /// reached. Returns whether the handler was invoked.
    ///
    /// The countdown keeps running, so the user should stop or restart it when `true` is
    /// returned, otherwise the next poll notifies again.
    pub fn poll(&self) -> bool {
        if self.core.is_elapsed(self.ticks.millis()) {
            self.handler.on_finished();
            return true;
        }
        false
    }

    /// Re-schedules the deadline relative to the current time. Neither the run state nor the
    /// handler are touched.
    pub fn update_time(&mut self, seconds: u32) {
        self.core.update(self.ticks.millis(), seconds);
    }

    #[inline]
    pub fn is_run(&self) -> bool {
        self.core.is_running()
    }

    /// Whole seconds *remaining* until the deadline. The name is historical.
    ///
    /// This is calculated as `(deadline - now) / 1000` with wrapping arithmetic, independently
    /// of the run state. Once the deadline has passed the result wraps to a very large value.
    /// Use [Self::remaining_seconds] for a saturating variant.
    pub fn elapsed_seconds(&self) -> u32 {
        self.core.raw_remaining_ms(self.ticks.millis()) / MILLIS_PER_SECOND
    }

    /// Whole seconds remaining until the deadline, 0 if the countdown is not running or elapsed.
    pub fn remaining_seconds(&self) -> u32 {
        self.core.remaining_secs(self.ticks.millis())
    }

    delegate! {
        to self.core {
            pub fn is_running(&self) -> bool;
            pub fn deadline(&self) -> Ticks;
            pub fn comparison(&self) -> ExpiryComparison;
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn tick_source(&self) -> &T {
        &self.ticks
    }

    pub fn core(&self) -> &CountdownCore {
        &self.core
    }

    pub fn into_parts(self) -> (T, H) {
        (self.ticks, self.handler)
    }
}

impl<T: TickSource + Debug, H: CountdownHandler + Debug> Countdown for NotifyCountdown<T, H> {
    fn has_expired(&self) -> bool {
        self.core.is_elapsed(self.ticks.millis())
    }

    fn reset(&mut self) {
        self.core.restart(self.ticks.millis());
        self.handler.on_start();
    }
}
