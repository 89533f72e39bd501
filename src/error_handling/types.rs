//! Error type definitions.
//!
//! This module defines the error types used throughout the crate. The two
//! provider failure classes are deliberately separate types: geocoding
//! failures never leave `LocationResolver`, schedule failures always reach
//! the caller.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use crate::config::HTTP_STATUS_TOO_MANY_REQUESTS;
use crate::schedule::PrayerLabel;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Latitude or longitude outside its valid range (or not a finite number).
///
/// Raised when a `Coordinate` is constructed, so nothing downstream ever sees
/// an out-of-range position.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("invalid coordinate ({latitude}, {longitude}): latitude must be within [-90, 90] and longitude within [-180, 180]")]
pub struct InvalidCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// The reverse-geocoding provider could not produce an address.
///
/// `LocationResolver` absorbs every variant by substituting the fallback
/// location; callers of the resolver never observe this type.
#[derive(Error, Debug)]
pub enum GeocodeUnavailable {
    /// Network-level failure (connect, TLS, body read).
    #[error("reverse geocode request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// Non-success HTTP status.
    #[error("reverse geocode provider returned HTTP {0}")]
    Status(u16),

    /// Response did not have the expected shape.
    #[error("malformed reverse geocode response: {0}")]
    MalformedResponse(String),

    /// The provider did not answer within the configured timeout.
    #[error("reverse geocode request timed out")]
    TimedOut,
}

/// No usable daily schedule could be produced for the requested date.
///
/// Retryable from the caller's perspective; no partial or unvalidated
/// schedule is ever returned alongside it.
#[derive(Error, Debug)]
pub enum ScheduleUnavailable {
    /// Network-level failure (connect, TLS, body read).
    #[error("timings request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// Non-success HTTP status.
    #[error("timings provider returned HTTP {0}")]
    Status(u16),

    /// Response did not have the expected shape.
    #[error("malformed timings response: {0}")]
    MalformedResponse(String),

    /// One of the six boundaries was absent.
    #[error("timings response is missing {0}")]
    MissingBoundary(PrayerLabel),

    /// A boundary was present but not a valid `HH:MM` wall-clock time.
    #[error("{label} has invalid clock time '{value}'")]
    InvalidClockTime { label: PrayerLabel, value: String },

    /// Boundaries were not strictly increasing within the day.
    #[error("{later} is not after {earlier}")]
    OutOfOrder {
        earlier: PrayerLabel,
        later: PrayerLabel,
    },

    /// The provider did not answer within the configured timeout.
    #[error("timings request timed out")]
    TimedOut,

    /// Failure reported by a non-HTTP provider implementation, which decides
    /// whether retrying can help.
    #[error("timings provider failed: {message}")]
    Provider { message: String, transient: bool },
}

impl ScheduleUnavailable {
    /// Whether an immediate automatic retry has a chance of succeeding.
    ///
    /// Timeouts, connection failures, 5xx and 429 are transient. Shape and
    /// ordering failures will repeat until the provider changes its data, so
    /// they are left to an explicit user retry.
    pub fn is_transient(&self) -> bool {
        match self {
            ScheduleUnavailable::Transport(e) => {
                if let Some(status) = e.status() {
                    let code = status.as_u16();
                    return code == HTTP_STATUS_TOO_MANY_REQUESTS || status.is_server_error();
                }
                e.is_timeout() || e.is_connect() || e.is_request()
            }
            ScheduleUnavailable::Status(code) => {
                *code == HTTP_STATUS_TOO_MANY_REQUESTS || (500..600).contains(code)
            }
            ScheduleUnavailable::TimedOut => true,
            ScheduleUnavailable::Provider { transient, .. } => *transient,
            ScheduleUnavailable::MalformedResponse(_)
            | ScheduleUnavailable::MissingBoundary(_)
            | ScheduleUnavailable::InvalidClockTime { .. }
            | ScheduleUnavailable::OutOfOrder { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_coordinate_message() {
        let err = InvalidCoordinate {
            latitude: 91.0,
            longitude: 0.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("91"));
        assert!(msg.contains("[-90, 90]"));
    }

    #[test]
    fn test_status_transience() {
        assert!(ScheduleUnavailable::Status(503).is_transient());
        assert!(ScheduleUnavailable::Status(500).is_transient());
        assert!(ScheduleUnavailable::Status(429).is_transient());
        assert!(!ScheduleUnavailable::Status(404).is_transient());
        assert!(!ScheduleUnavailable::Status(400).is_transient());
    }

    #[test]
    fn test_validation_failures_are_not_transient() {
        assert!(!ScheduleUnavailable::MissingBoundary(PrayerLabel::Asr).is_transient());
        assert!(!ScheduleUnavailable::OutOfOrder {
            earlier: PrayerLabel::Dhuhr,
            later: PrayerLabel::Asr,
        }
        .is_transient());
        assert!(!ScheduleUnavailable::MalformedResponse("no data".into()).is_transient());
        assert!(ScheduleUnavailable::TimedOut.is_transient());
    }

    #[test]
    fn test_provider_failure_transience_is_provider_defined() {
        let permanent = ScheduleUnavailable::Provider {
            message: "unsupported calculation method".into(),
            transient: false,
        };
        let busy = ScheduleUnavailable::Provider {
            message: "backend busy".into(),
            transient: true,
        };
        assert!(!permanent.is_transient());
        assert!(busy.is_transient());
        assert_eq!(
            permanent.to_string(),
            "timings provider failed: unsupported calculation method"
        );
    }

    #[test]
    fn test_schedule_error_messages_name_the_boundary() {
        let err = ScheduleUnavailable::InvalidClockTime {
            label: PrayerLabel::Maghrib,
            value: "25:99".into(),
        };
        assert_eq!(err.to_string(), "Maghrib has invalid clock time '25:99'");

        let err = ScheduleUnavailable::OutOfOrder {
            earlier: PrayerLabel::Asr,
            later: PrayerLabel::Maghrib,
        };
        assert_eq!(err.to_string(), "Maghrib is not after Asr");
    }
}
