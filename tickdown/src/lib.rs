//! # tickdown: countdown timers for wrapping millisecond tick counters
//!
//! Microcontrollers usually provide time as a free-running millisecond counter which wraps
//! around after it exhausts its range. This crate provides countdowns on top of such a counter.
//!
//! ## Overview
//!
//! The core modules of this crate include
//!
//!  - The [time] module which provides the [time::TickSource] abstraction, concrete tick sources
//!    and the modular arithmetic used to compare tick values against deadlines.
//!  - The [polling] module which provides the [polling::PollingCountdown]. The user asks whether
//!    it has elapsed and can add or remove seconds while it runs.
//!  - The [notify] module which provides the [notify::NotifyCountdown]. The user polls it
//!    periodically and a [notify::CountdownHandler] is notified while it is elapsed.
//!
//! Both countdown flavours share the [countdown::CountdownCore]. A countdown tracks exactly one
//! deadline and is meant to be used from a single execution context.
//!
//! ## Features
//!
//!  - `std`: enables `StdTickSource`, which is based on the host clock. Enabled by default.
//!  - `alloc`: enables boxed callback support.
//!  - `serde`: enables serialization support for the configuration types.
//!  - `defmt`: enables [defmt](https://docs.rs/defmt) formatting for the public enums and
//!    the configuration. Check it for a bare-metal target, for example with
//!    `cargo check -p tickdown --target thumbv6m-none-eabi --no-default-features --features defmt`.
#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#[cfg(any(feature = "alloc", test))]
extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

pub mod config;
pub mod countdown;
pub mod notify;
pub mod polling;
pub mod time;

pub use config::{CountdownConfig, CountdownMode};
pub use notify::{Callbacks, CountdownHandler, NotifyCountdown};
pub use polling::PollingCountdown;
pub use time::{Countdown, ExpiryComparison, TickSource, Ticks};
