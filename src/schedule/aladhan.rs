//! Aladhan daily timings provider.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use serde::Deserialize;

use super::provider::TimingsProvider;
use super::types::RawTimings;
use crate::config::{
    TIMINGS_METHOD, TIMINGS_MIDNIGHT_MODE, TIMINGS_SCHOOL, TIMINGS_TIMEZONE, TIMINGS_TUNE,
};
use crate::error_handling::ScheduleUnavailable;
use crate::geo::Coordinate;

#[derive(Debug, Deserialize)]
struct TimingsResponse {
    data: Option<TimingsData>,
}

#[derive(Debug, Deserialize)]
struct TimingsData {
    timings: Option<RawTimings>,
}

/// Timings provider backed by an Aladhan `/v1/timings` endpoint.
///
/// Always requests the single supported convention (method 13, Hanafi Asr,
/// no tuning) with times localized to `Europe/Istanbul`.
pub struct AladhanClient {
    client: Arc<reqwest::Client>,
    base_url: String,
}

impl AladhanClient {
    /// `client` should already carry the User-Agent and timeout.
    pub fn new(client: Arc<reqwest::Client>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn query(coordinate: &Coordinate, date: NaiveDate) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", format!("{:.6}", coordinate.latitude())),
            ("longitude", format!("{:.6}", coordinate.longitude())),
            ("method", TIMINGS_METHOD.to_string()),
            ("tune", TIMINGS_TUNE.to_string()),
            ("school", TIMINGS_SCHOOL.to_string()),
            ("midnightMode", TIMINGS_MIDNIGHT_MODE.to_string()),
            ("date", date.format("%Y-%m-%d").to_string()),
            ("timezonestring", TIMINGS_TIMEZONE.to_string()),
        ]
    }
}

fn parse_body(body: &str) -> Result<RawTimings, ScheduleUnavailable> {
    let parsed: TimingsResponse = serde_json::from_str(body)
        .map_err(|e| ScheduleUnavailable::MalformedResponse(e.to_string()))?;
    parsed
        .data
        .and_then(|data| data.timings)
        .ok_or_else(|| {
            ScheduleUnavailable::MalformedResponse("response has no data.timings".to_string())
        })
}

#[async_trait]
impl TimingsProvider for AladhanClient {
    async fn fetch(
        &self,
        coordinate: Coordinate,
        date: NaiveDate,
    ) -> Result<RawTimings, ScheduleUnavailable> {
        debug!("Calling timings provider at {} for {} on {}", self.base_url, coordinate, date);
        let response = self
            .client
            .get(&self.base_url)
            .query(&Self::query(&coordinate, date))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScheduleUnavailable::TimedOut
                } else {
                    ScheduleUnavailable::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScheduleUnavailable::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_body(&body)
    }
}
