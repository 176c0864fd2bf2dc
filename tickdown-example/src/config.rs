use std::{fs, path::Path, str::FromStr, time::Duration};

use log::LevelFilter;
use serde::Deserialize;
use tickdown::config::ConfigError;
use tickdown::CountdownConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_POLL_PERIOD_MS: u64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("reading configuration file failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing configuration file failed: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid countdown configuration: {0}")]
    Countdown(#[from] ConfigError),
    #[error("invalid log level {0:?}")]
    InvalidLogLevel(String),
    #[error("poll period must not be zero")]
    ZeroPollPeriod,
    #[error("setting up logging with fern failed: {0}")]
    Logger(#[from] fern::InitError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, AppError> {
        LevelFilter::from_str(&self.level)
            .map_err(|_| AppError::InvalidLogLevel(self.level.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub poll_period_ms: u64,
    pub restarts: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            poll_period_ms: DEFAULT_POLL_PERIOD_MS,
            restarts: 0,
        }
    }
}

impl HostConfig {
    pub fn poll_period(&self) -> Duration {
        Duration::from_millis(self.poll_period_ms)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub host: HostConfig,
    pub countdown: CountdownConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let toml_str = fs::read_to_string(path)?;
        Self::from_toml_str(&toml_str)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.logging.level_filter()?;
        if self.host.poll_period_ms == 0 {
            return Err(AppError::ZeroPollPeriod);
        }
        self.countdown.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tickdown::{CountdownMode, ExpiryComparison};

    use super::*;

    #[test]
    fn test_full_config() {
        let config = AppConfig::from_toml_str(
            r#"
            [logging]
            level = "debug"
            file = "countdown.log"

            [host]
            poll_period_ms = 20
            restarts = 3

            [countdown]
            mode = "notify"
            comparison = "direct"
            duration_secs = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(config.logging.file.as_deref(), Some("countdown.log"));
        assert_eq!(config.host.poll_period(), Duration::from_millis(20));
        assert_eq!(config.host.restarts, 3);
        assert_eq!(config.countdown.mode, CountdownMode::Notify);
        assert_eq!(config.countdown.comparison, ExpiryComparison::Direct);
        assert_eq!(config.countdown.duration_secs, 12);
        config.validate().unwrap();
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.logging.level_filter().unwrap(), LevelFilter::Info);
        assert_eq!(config.host.poll_period_ms, DEFAULT_POLL_PERIOD_MS);
        assert_eq!(config.countdown.mode, CountdownMode::Polling);
        config.validate().unwrap();
    }

    #[test]
    fn test_invalid_values() {
        let config = AppConfig::from_toml_str("[logging]\nlevel = \"loud\"").unwrap();
        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidLogLevel(level)) if level == "loud"
        ));
        let config = AppConfig::from_toml_str("[host]\npoll_period_ms = 0").unwrap();
        assert!(matches!(config.validate(), Err(AppError::ZeroPollPeriod)));
        let config = AppConfig::from_toml_str(
            "[countdown]\ncomparison = \"wrap_aware\"\nduration_secs = 3000000",
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(AppError::Countdown(ConfigError::DurationExceedsWrapWindow { .. }))
        ));
        let config = AppConfig::from_toml_str("[countdown]\nduration_secs = 3000000").unwrap();
        assert_eq!(config.countdown.comparison, ExpiryComparison::Direct);
        config.validate().unwrap();
        let config = AppConfig::from_toml_str("[countdown]\nduration_secs = 5000000").unwrap();
        assert!(matches!(
            config.validate(),
            Err(AppError::Countdown(ConfigError::DurationOverflow { .. }))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let result = AppConfig::from_toml_str("[countdown]\nmode = \"sometimes\"");
        assert!(matches!(result, Err(AppError::Toml(_))));
    }

    #[test]
    fn test_shipped_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        let config = AppConfig::load(&path).unwrap();
        config.validate().unwrap();
        assert_eq!(config.countdown.mode, CountdownMode::Notify);
        assert_eq!(config.countdown.comparison, ExpiryComparison::Direct);
        assert_eq!(config.host.restarts, 1);
    }
}
