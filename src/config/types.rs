//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CACHE_DIR, DEFAULT_GEOCODE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_TIMINGS_URL, DEFAULT_USER_AGENT,
    TICK_INTERVAL,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Parses an `HH:MM` command-line value.
fn parse_clock_arg(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|e| format!("expected HH:MM, got '{}': {}", value, e))
}

/// Crate configuration.
///
/// Usable both as the CLI definition (`Config::parse()`) and programmatically
/// through `Default`.
///
/// # Examples
///
/// ```no_run
/// use namazio::Config;
///
/// let config = Config {
///     latitude: 41.0082,
///     longitude: 28.9784,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "namazio", version, about = "Prayer times, countdown and Qibla direction")]
pub struct Config {
    /// Latitude of the device fix in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: f64,

    /// Longitude of the device fix in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: f64,

    /// Calendar date to fetch (defaults to today, local time)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Wall-clock time to evaluate the schedule at, as HH:MM (defaults to now)
    #[arg(long, value_parser = parse_clock_arg)]
    pub at: Option<NaiveTime>,

    /// Keep running and print the schedule state on every tick
    #[arg(long)]
    pub watch: bool,

    /// Seconds between ticks in watch mode
    #[arg(long, default_value_t = TICK_INTERVAL.as_secs())]
    pub tick_seconds: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Daily timings endpoint
    #[arg(long, default_value = DEFAULT_TIMINGS_URL)]
    pub timings_url: String,

    /// Reverse-geocoding endpoint
    #[arg(long, default_value = DEFAULT_GEOCODE_URL)]
    pub geocode_url: String,

    /// Directory for the persisted same-day schedule (disabled when absent;
    /// the flag alone uses `.namazio_cache`)
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latitude: crate::config::FALLBACK_LATITUDE,
            longitude: crate::config::FALLBACK_LONGITUDE,
            date: None,
            at: None,
            watch: false,
            tick_seconds: TICK_INTERVAL.as_secs(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timings_url: DEFAULT_TIMINGS_URL.to_string(),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            cache_dir: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.timeout_seconds, 15);
        assert_eq!(config.tick_seconds, 60);
        assert!(!config.watch);
        assert!(config.cache_dir.is_none());
        assert_eq!(config.user_agent, "Namazio Prayer Times App");
    }

    #[test]
    fn test_parse_negative_longitude() {
        let config = Config::try_parse_from([
            "namazio",
            "--latitude",
            "37.4220",
            "--longitude",
            "-122.0841",
        ])
        .unwrap();
        assert_eq!(config.longitude, -122.0841);
    }

    #[test]
    fn test_parse_at_clock_value() {
        let config = Config::try_parse_from([
            "namazio",
            "--latitude",
            "41.0",
            "--longitude",
            "29.0",
            "--at",
            "21:05",
            "--date",
            "2026-03-20",
        ])
        .unwrap();
        assert_eq!(config.at, NaiveTime::from_hms_opt(21, 5, 0));
        assert_eq!(config.date, NaiveDate::from_ymd_opt(2026, 3, 20));
    }

    #[test]
    fn test_parse_rejects_malformed_clock() {
        let result = Config::try_parse_from([
            "namazio",
            "--latitude",
            "41.0",
            "--longitude",
            "29.0",
            "--at",
            "9pm",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bare_cache_dir_flag_uses_default_directory() {
        let config = Config::try_parse_from([
            "namazio",
            "--latitude",
            "41.0",
            "--longitude",
            "29.0",
            "--cache-dir",
        ])
        .unwrap();
        assert_eq!(config.cache_dir, Some(PathBuf::from(DEFAULT_CACHE_DIR)));
    }
}
