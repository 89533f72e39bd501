//! Configuration constants.
//!
//! This module defines the constants used throughout the crate: provider
//! endpoints, the fixed calculation convention, guard coordinates, and retry
//! tuning for schedule fetches.

use std::time::Duration;

// Provider endpoints
/// Reverse-geocoding endpoint (OpenStreetMap Nominatim)
pub const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/reverse";
/// Daily timings endpoint (Aladhan)
pub const DEFAULT_TIMINGS_URL: &str = "https://api.aladhan.com/v1/timings";

/// User-Agent sent to both providers.
///
/// Nominatim's usage policy rejects requests without an identifying agent.
pub const DEFAULT_USER_AGENT: &str = "Namazio Prayer Times App";

/// Per-request timeout in seconds (applies to both providers)
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Language requested for reverse-geocoded place names
pub const GEOCODE_LANGUAGE: &str = "tr";

// Calculation convention (Diyanet İşleri Başkanlığı)
// Only this convention is supported; the supported-region guard exists because of it.
pub const TIMINGS_METHOD: u8 = 13;
/// Asr juristic school: 1 = Hanafi
pub const TIMINGS_SCHOOL: u8 = 1;
pub const TIMINGS_TUNE: &str = "0,0,0,0,0,0,0,0,0";
pub const TIMINGS_MIDNIGHT_MODE: u8 = 0;
pub const TIMINGS_TIMEZONE: &str = "Europe/Istanbul";

// Supported region
pub const SUPPORTED_COUNTRY_NAMES: &[&str] = &["Türkiye", "Turkey"];
pub const SUPPORTED_COUNTRY_CODE: &str = "tr";

// Fallback location (Ankara / Çankaya)
pub const FALLBACK_LATITUDE: f64 = 39.9334;
pub const FALLBACK_LONGITUDE: f64 = 32.8597;
pub const FALLBACK_CITY: &str = "Ankara";
pub const FALLBACK_DISTRICT: &str = "Çankaya";

/// Used when the geocoder returns no city-like field
pub const NEUTRAL_CITY: &str = "Ankara";
/// Used when the geocoder returns no district-like field
pub const NEUTRAL_DISTRICT: &str = "Merkez";

// Android emulator default fix (Googleplex, Mountain View)
pub const EMULATOR_LATITUDE: f64 = 37.4220;
pub const EMULATOR_LONGITUDE: f64 = -122.0841;
/// Per-axis tolerance in degrees
pub const EMULATOR_TOLERANCE_DEG: f64 = 0.01;

// Qibla target (Kaaba)
pub const KAABA_LATITUDE: f64 = 21.422487;
pub const KAABA_LONGITUDE: f64 = 39.826206;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// How often the ticker re-derives the schedule state
pub const TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Buffered updates between the ticker and its consumer
pub const UPDATE_CHANNEL_CAPACITY: usize = 16;

// Persisted day cache
pub const DEFAULT_CACHE_DIR: &str = ".namazio_cache";
pub const SCHEDULE_CACHE_FILE: &str = "schedule.json";

// Retry configuration for schedule fetches
/// Initial delay in milliseconds before the first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Backoff multiplier
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 15;
/// Total retry attempts after the initial one
pub const RETRY_MAX_ATTEMPTS: usize = 3;

/// HTTP 429, treated as transient
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;
