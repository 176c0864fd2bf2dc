use core::cell::Cell;

use tickdown::notify::Callbacks;
use tickdown::time::{AtomicTicks, FnTicks, TickSource, Ticks};
use tickdown::{
    Countdown, CountdownConfig, CountdownMode, ExpiryComparison, NotifyCountdown,
    PollingCountdown,
};

static SYSTICK_MILLIS: AtomicTicks = AtomicTicks::new_with_value(Ticks::MAX - 2_500);

fn millis() -> Ticks {
    SYSTICK_MILLIS.millis()
}

// Simulates the SysTick interrupt by incrementing the counter one millisecond at a time.
fn run_systick(ms: u32) {
    for _ in 0..ms {
        SYSTICK_MILLIS.increment();
    }
}

#[test]
fn countdowns_across_counter_wrap() {
    let ticks = FnTicks::new(millis as fn() -> Ticks);
    let mut polling = PollingCountdown::with_comparison(ticks, ExpiryComparison::WrapAware);
    let finished = Cell::new(0);
    let mut notify = NotifyCountdown::with_comparison(
        ticks,
        Callbacks::none().with_finished(|| finished.set(finished.get() + 1)),
        ExpiryComparison::WrapAware,
    );
    polling.start(5);
    notify.start(5);
    assert_eq!(polling.deadline(), 2_499);
    assert_eq!(notify.deadline(), 2_499);

    // Counter wraps after 2501 ticks, the deadline is still 2499 ticks after that.
    run_systick(4_999);
    assert!(!polling.is_elapsed());
    assert!(!notify.poll());
    assert_eq!(polling.elapsed_seconds(), 0);
    assert_eq!(notify.remaining_seconds(), 0);

    run_systick(1);
    assert!(polling.is_elapsed());
    assert!(notify.poll());
    assert!(notify.poll());
    assert_eq!(finished.get(), 2);

    notify.stop();
    polling.stop();
    run_systick(100);
    assert!(!notify.poll());
    assert!(!polling.is_elapsed());
    assert_eq!(finished.get(), 2);
}

#[test]
fn host_loop_with_extension() {
    let ticks = AtomicTicks::new();
    let config = CountdownConfig::new(CountdownMode::Polling, ExpiryComparison::WrapAware, 10);
    config.validate().unwrap();
    let mut countdown = PollingCountdown::from_config(&ticks, &config);
    countdown.reset();

    let mut polls = 0;
    let mut extended = false;
    while !countdown.has_expired() {
        ticks.advance(100);
        polls += 1;
        if !extended && countdown.elapsed_seconds() < 5 {
            countdown.add_seconds(3);
            extended = true;
        }
    }
    assert!(extended);
    assert_eq!(ticks.millis(), 13_000);
    assert_eq!(polls, 130);

    countdown.reset();
    countdown.remove_seconds(20);
    assert!(countdown.has_expired());
}

#[test]
fn default_comparison_handles_long_durations() {
    let ticks = AtomicTicks::new();
    let finished = Cell::new(0);
    let mut polling = PollingCountdown::new(&ticks);
    let mut notify = NotifyCountdown::new(
        &ticks,
        Callbacks::none().with_finished(|| finished.set(finished.get() + 1)),
    );
    assert_eq!(polling.comparison(), ExpiryComparison::Direct);
    assert_eq!(notify.comparison(), ExpiryComparison::Direct);
    polling.start(3_000_000);
    notify.start(3_000_000);
    assert!(!polling.is_elapsed());
    assert_eq!(polling.elapsed_seconds(), 3_000_000);
    assert!(!notify.poll());
    assert_eq!(finished.get(), 0);

    ticks.set(3_000_000_000);
    assert!(polling.is_elapsed());
    assert!(notify.poll());
    // Still elapsed more than 2^31 ms after the deadline.
    ticks.set(Ticks::MAX);
    assert!(polling.is_elapsed());
    assert!(notify.poll());
    assert_eq!(finished.get(), 2);
}
