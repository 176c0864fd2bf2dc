//! Host loops which drive the two countdown flavours.
use core::cell::Cell;

use tickdown::{CountdownHandler, NotifyCountdown, PollingCountdown, TickSource};

use crate::config::AppConfig;

/// Adjustments applied to a polling countdown right after it was started.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Adjustments {
    pub add_secs: u32,
    pub remove_secs: u32,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub polls: u64,
    pub finished: u32,
}

#[derive(Debug, Default)]
pub struct LoggingHandler {
    finished: Cell<u32>,
}

impl LoggingHandler {
    pub fn finished(&self) -> u32 {
        self.finished.get()
    }
}

impl CountdownHandler for LoggingHandler {
    fn on_finished(&self) {
        self.finished.set(self.finished.get() + 1);
        log::info!("countdown finished ({} times)", self.finished.get());
    }

    fn on_start(&self) {
        log::info!("countdown started");
    }

    fn on_stop(&self) {
        log::info!("countdown stopped");
    }
}

fn log_remaining(last: &mut Option<u32>, remaining: u32) {
    if *last != Some(remaining) {
        log::debug!("{} s remaining", remaining);
        *last = Some(remaining);
    }
}

/// Polls a [NotifyCountdown] until it finished `restarts + 1` times. The countdown is started
/// again from the host loop each time it finishes, except for the last time, where it is stopped.
pub fn run_notify<T: TickSource>(
    ticks: T,
    config: &AppConfig,
    mut wait: impl FnMut(),
) -> RunSummary {
    let handler = LoggingHandler::default();
    let duration_secs = config.countdown.duration_secs;
    let mut countdown = NotifyCountdown::from_config(ticks, &handler, &config.countdown);
    let mut summary = RunSummary::default();
    let mut last_remaining = None;
    countdown.start(duration_secs);
    loop {
        summary.polls += 1;
        if countdown.poll() {
            if handler.finished() > config.host.restarts {
                countdown.stop();
                break;
            }
            countdown.start(duration_secs);
            last_remaining = None;
        } else {
            log_remaining(&mut last_remaining, countdown.remaining_seconds());
        }
        wait();
    }
    summary.finished = handler.finished();
    summary
}

/// Checks a [PollingCountdown] until it elapsed `restarts + 1` times.
pub fn run_polling<T: TickSource>(
    ticks: T,
    config: &AppConfig,
    adjustments: Adjustments,
    mut wait: impl FnMut(),
) -> RunSummary {
    let duration_secs = config.countdown.duration_secs;
    let mut countdown = PollingCountdown::from_config(ticks, &config.countdown);
    let mut summary = RunSummary::default();
    let mut last_remaining = None;
    countdown.start(duration_secs);
    log::info!("countdown started with {} s", duration_secs);
    if adjustments.add_secs > 0 {
        countdown.add_seconds(adjustments.add_secs);
        log::info!("added {} s", adjustments.add_secs);
    }
    if adjustments.remove_secs > 0 {
        countdown.remove_seconds(adjustments.remove_secs);
        log::info!("removed {} s", adjustments.remove_secs);
    }
    loop {
        summary.polls += 1;
        if countdown.is_elapsed() {
            summary.finished += 1;
            log::info!("countdown elapsed ({} times)", summary.finished);
            if summary.finished > config.host.restarts {
                countdown.stop();
                break;
            }
            countdown.start(duration_secs);
            last_remaining = None;
        } else {
            log_remaining(&mut last_remaining, countdown.elapsed_seconds());
        }
        wait();
    }
    summary
}

#[cfg(test)]
mod tests {
    use tickdown::time::AtomicTicks;
    use tickdown::CountdownMode;

    use super::*;

    fn test_config(mode: CountdownMode, duration_secs: u32, restarts: u32) -> AppConfig {
        let mut config = AppConfig::default();
        config.countdown.mode = mode;
        config.countdown.duration_secs = duration_secs;
        config.host.restarts = restarts;
        config
    }

    #[test]
    fn test_notify_run_with_restart() {
        let ticks = AtomicTicks::new();
        let config = test_config(CountdownMode::Notify, 3, 1);
        let period = config.host.poll_period_ms as u32;
        let summary = run_notify(&ticks, &config, || ticks.advance(period));
        assert_eq!(summary.finished, 2);
        assert_eq!(summary.polls, 61);
        assert_eq!(ticks.millis(), 6000);
    }

    #[test]
    fn test_polling_run_with_adjustments() {
        let ticks = AtomicTicks::new();
        let config = test_config(CountdownMode::Polling, 3, 0);
        let period = config.host.poll_period_ms as u32;
        let adjustments = Adjustments {
            add_secs: 2,
            remove_secs: 1,
        };
        let summary = run_polling(&ticks, &config, adjustments, || ticks.advance(period));
        assert_eq!(summary.finished, 1);
        assert_eq!(summary.polls, 41);
        assert_eq!(ticks.millis(), 4000);
    }

    #[test]
    fn test_polling_remove_all_seconds() {
        let ticks = AtomicTicks::new();
        let config = test_config(CountdownMode::Polling, 3, 0);
        let adjustments = Adjustments {
            add_secs: 0,
            remove_secs: 10,
        };
        let summary = run_polling(&ticks, &config, adjustments, || ticks.advance(100));
        assert_eq!(summary.finished, 1);
        assert_eq!(summary.polls, 1);
        assert_eq!(ticks.millis(), 0);
    }
}
