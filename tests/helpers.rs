// Shared test helpers for provider mocks and configuration.
//
// This module provides common utilities used across multiple test files to reduce duplication.

#![allow(dead_code)] // Not every test file uses every helper

use chrono::{NaiveDate, NaiveTime};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use namazio::{Config, LogFormat, LogLevel};

pub const GEOCODE_PATH: &str = "/reverse";
pub const TIMINGS_PATH: &str = "/v1/timings";

/// A Nominatim `/reverse` body for a place in the given country.
pub fn nominatim_body(city: &str, district: &str, country: &str, code: &str) -> Value {
    json!({
        "place_id": 1234,
        "display_name": format!("{}, {}, {}", district, city, country),
        "address": {
            "suburb": district,
            "city": city,
            "country": country,
            "country_code": code
        }
    })
}

/// An Aladhan `/v1/timings` body. Times are Fajr, Sunrise, Dhuhr, Asr, Maghrib, Isha.
pub fn aladhan_body(times: [&str; 6]) -> Value {
    json!({
        "code": 200,
        "status": "OK",
        "data": {
            "timings": {
                "Imsak": times[0],
                "Fajr": times[0],
                "Sunrise": times[1],
                "Dhuhr": times[2],
                "Asr": times[3],
                "Sunset": times[4],
                "Maghrib": times[4],
                "Isha": times[5],
                "Midnight": "00:25"
            },
            "meta": { "method": { "id": 13 }, "school": "HANAFI" }
        }
    })
}

pub const ISTANBUL_TIMES: [&str; 6] = ["06:05", "07:35", "13:10", "16:20", "18:44", "20:05"];

/// Mounts a successful geocode response on `server`.
pub async fn mount_geocode(server: &MockServer, body: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Mounts a successful timings response on `server`.
pub async fn mount_timings(server: &MockServer, times: [&str; 6], expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(TIMINGS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(aladhan_body(times)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// A config pointing both providers at `server`, evaluated at a fixed moment.
pub fn test_config(server: &MockServer, latitude: f64, longitude: f64, at: (u32, u32)) -> Config {
    Config {
        latitude,
        longitude,
        date: NaiveDate::from_ymd_opt(2026, 3, 20),
        at: NaiveTime::from_hms_opt(at.0, at.1, 0),
        timeout_seconds: 5,
        geocode_url: format!("{}{}", server.uri(), GEOCODE_PATH),
        timings_url: format!("{}{}", server.uri(), TIMINGS_PATH),
        log_level: LogLevel::Debug,
        log_format: LogFormat::Plain,
        ..Default::default()
    }
}
