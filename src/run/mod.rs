//! Entry points used by the binary.

mod report;
mod service;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::app::{
    shutdown_gracefully, spawn_schedule_ticker, FixedClock, LocalClock, ScheduleUpdate,
    SystemClock,
};
use crate::config::{Config, UPDATE_CHANNEL_CAPACITY};
use crate::geo::Coordinate;
use crate::initialization::init_client;
use crate::location::ResolvedLocation;

pub use report::PrayerReport;
pub use service::PrayerService;

/// Applies the `--date`/`--at` overrides to the clock's reading.
fn evaluation_time(config: &Config, clock: &dyn LocalClock) -> NaiveDateTime {
    let now = clock.now();
    let date = config.date.unwrap_or(now.date());
    let time = config.at.unwrap_or(now.time());
    date.and_time(time)
}

/// Validates the configured coordinate and builds a service around it.
pub fn init_service(config: &Config) -> Result<(Arc<PrayerService>, Coordinate)> {
    let raw = Coordinate::new(config.latitude, config.longitude)?;
    let client = init_client(config).context("Failed to initialize HTTP client")?;
    Ok((Arc::new(PrayerService::from_config(config, client)), raw))
}

/// Produces a single report for the configured position and time.
///
/// # Errors
///
/// Fails on an out-of-range coordinate or if the day's schedule is unavailable.
pub async fn run_report(config: &Config) -> Result<PrayerReport> {
    let (service, raw) = init_service(config)?;
    let now = evaluation_time(config, &SystemClock);
    service
        .report(raw, now)
        .await
        .context("Prayer times are unavailable")
}

/// A running ticker and the channel it publishes to.
pub struct Watch {
    pub location: Arc<ResolvedLocation>,
    pub service: Arc<PrayerService>,
    pub updates: mpsc::Receiver<ScheduleUpdate>,
    ticker: JoinHandle<()>,
    cancel: CancellationToken,
}

impl Watch {
    /// Cancels the ticker and waits for it to exit.
    pub async fn stop(self) {
        shutdown_gracefully(self.cancel, Some(self.ticker)).await;
    }
}

/// Resolves the configured position once and starts the ticker.
///
/// With `--date` or `--at` the ticker runs against a clock frozen at that
/// moment; otherwise it follows the system clock.
pub async fn start_watch(config: &Config) -> Result<Watch> {
    let (service, raw) = init_service(config)?;
    let location = service.resolve_location(raw).await;

    let clock: Arc<dyn LocalClock> = if config.date.is_some() || config.at.is_some() {
        Arc::new(FixedClock::new(evaluation_time(config, &SystemClock)))
    } else {
        Arc::new(SystemClock)
    };

    let (tx, updates) = mpsc::channel(UPDATE_CHANNEL_CAPACITY);
    let cancel = CancellationToken::new();
    let ticker = spawn_schedule_ticker(
        Arc::clone(&service),
        (*location).clone(),
        clock,
        Duration::from_secs(config.tick_seconds.max(1)),
        tx,
        cancel.clone(),
    );

    Ok(Watch {
        location,
        service,
        updates,
        ticker,
        cancel,
    })
}
