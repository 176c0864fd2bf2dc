use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use clap::{Parser, ValueEnum};
use tickdown::time::StdTickSource;
use tickdown::{CountdownMode, ExpiryComparison};

use crate::config::{AppConfig, AppError, DEFAULT_CONFIG_PATH};
use crate::logging::setup_logger;
use crate::runner::{run_notify, run_polling, Adjustments};

mod config;
mod logging;
mod runner;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Polling,
    Notify,
}

impl From<ModeArg> for CountdownMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Polling => CountdownMode::Polling,
            ModeArg::Notify => CountdownMode::Notify,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ComparisonArg {
    Direct,
    #[value(name = "wrap_aware")]
    WrapAware,
}

impl From<ComparisonArg> for ExpiryComparison {
    fn from(value: ComparisonArg) -> Self {
        match value {
            ComparisonArg::Direct => ExpiryComparison::Direct,
            ComparisonArg::WrapAware => ExpiryComparison::WrapAware,
        }
    }
}

/// Runs a countdown on the host clock.
#[derive(Parser, Debug)]
struct Cli {
    /// Path of the TOML configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[arg(short, long)]
    mode: Option<ModeArg>,

    #[arg(long)]
    comparison: Option<ComparisonArg>,

    /// Countdown duration in seconds.
    #[arg(short, long)]
    duration: Option<u32>,

    /// Set poll period in milliseconds.
    #[arg(short, long)]
    poll_period_ms: Option<u64>,

    /// Seconds added right after the start. Polling mode only.
    #[arg(long, default_value_t = 0)]
    add_secs: u32,

    /// Seconds removed right after the start. Polling mode only.
    #[arg(long, default_value_t = 0)]
    remove_secs: u32,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(mode) = self.mode {
            config.countdown.mode = mode.into();
        }
        if let Some(comparison) = self.comparison {
            config.countdown.comparison = comparison.into();
        }
        if let Some(duration) = self.duration {
            config.countdown.duration_secs = duration;
        }
        if let Some(poll_period_ms) = self.poll_period_ms {
            config.host.poll_period_ms = poll_period_ms;
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config_exists = cli.config.exists();
    let mut config = if config_exists {
        AppConfig::load(&cli.config)?
    } else {
        AppConfig::default()
    };
    cli.apply_overrides(&mut config);
    config.validate()?;
    setup_logger(&config.logging)?;
    if !config_exists {
        log::warn!(
            "configuration file {} not found, using defaults",
            cli.config.display()
        );
    }
    log::info!("running countdown with {:?}", config.countdown);

    let ticks = StdTickSource::new();
    let poll_period = config.host.poll_period();
    let wait = || thread::sleep(poll_period);
    let summary = match config.countdown.mode {
        CountdownMode::Polling => {
            let adjustments = Adjustments {
                add_secs: cli.add_secs,
                remove_secs: cli.remove_secs,
            };
            run_polling(ticks, &config, adjustments, wait)
        }
        CountdownMode::Notify => {
            if cli.add_secs > 0 || cli.remove_secs > 0 {
                log::warn!("adding or removing seconds is only supported in polling mode");
            }
            run_notify(ticks, &config, wait)
        }
    };
    log::info!(
        "countdown finished {} times after {} polls",
        summary.finished,
        summary.polls
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    println!("tickdown countdown example");
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The logger might not be set up yet.
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
