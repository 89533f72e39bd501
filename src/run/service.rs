//! Facade wiring location resolution, schedule retrieval, and Qibla.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use log::info;

use super::report::PrayerReport;
use crate::app::GenerationSlot;
use crate::config::Config;
use crate::error_handling::ScheduleUnavailable;
use crate::geo::Coordinate;
use crate::location::{LocationResolver, NominatimClient, ResolvedLocation};
use crate::qibla::{QiblaCalculator, QiblaResult};
use crate::schedule::{
    AladhanClient, DailySchedule, PrayerScheduleProvider, ScheduleClock, ScheduleStore,
};

/// Entry point for everything the UI layer asks of the core.
///
/// Holds the current [`ResolvedLocation`] and the single-slot schedule
/// cache. Both are replaced wholesale and only by the newest request.
pub struct PrayerService {
    resolver: LocationResolver,
    schedules: PrayerScheduleProvider,
    qibla: QiblaCalculator,
    location: GenerationSlot<ResolvedLocation>,
}

impl PrayerService {
    pub fn new(resolver: LocationResolver, schedules: PrayerScheduleProvider) -> Self {
        Self {
            resolver,
            schedules,
            qibla: QiblaCalculator::new(),
            location: GenerationSlot::new(),
        }
    }

    /// Builds a service talking to the configured HTTP providers.
    pub fn from_config(config: &Config, client: Arc<reqwest::Client>) -> Self {
        let geocoder = NominatimClient::new(Arc::clone(&client), config.geocode_url.clone());
        let resolver = LocationResolver::new(Arc::new(geocoder))
            .with_timeout(Duration::from_secs(config.timeout_seconds));

        let timings = AladhanClient::new(client, config.timings_url.clone());
        let mut schedules = PrayerScheduleProvider::new(Arc::new(timings));
        if let Some(dir) = &config.cache_dir {
            schedules = schedules.with_store(ScheduleStore::new(dir.clone()));
        }

        Self::new(resolver, schedules)
    }

    /// Resolves `raw` and makes it the current location.
    ///
    /// If a newer resolution was started while this one was in flight, its
    /// result wins and this one is returned to the caller only. A change of
    /// place drops the cached schedule and any fetch still in flight.
    pub async fn resolve_location(&self, raw: Coordinate) -> Arc<ResolvedLocation> {
        let generation = self.location.begin();
        let resolved = Arc::new(self.resolver.resolve(raw).await);

        let previous = self.location.current();
        if self.location.publish(generation, Arc::clone(&resolved)) {
            if let Some(previous) = previous {
                if previous.coordinate != resolved.coordinate {
                    info!(
                        "Location changed from {} to {}, dropping cached schedule",
                        previous.display_name(),
                        resolved.display_name()
                    );
                    self.schedules.invalidate();
                }
            }
        }
        resolved
    }

    /// The most recently resolved location, if any.
    pub fn current_location(&self) -> Option<Arc<ResolvedLocation>> {
        self.location.current()
    }

    /// Today's schedule for `location`, at most one provider call per date.
    pub async fn schedule_for(
        &self,
        location: &ResolvedLocation,
        date: NaiveDate,
    ) -> Result<Arc<DailySchedule>, ScheduleUnavailable> {
        self.schedules.get_schedule(location, date).await
    }

    /// Qibla bearing and distance from `location`.
    pub fn qibla(&self, location: &ResolvedLocation) -> QiblaResult {
        self.qibla.compute(&location.coordinate)
    }

    /// One-shot: resolve, fetch, derive the state at `now`, and compute Qibla.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleUnavailable` if the day's schedule cannot be obtained.
    /// Location problems never fail the report; they yield the fallback.
    pub async fn report(
        &self,
        raw: Coordinate,
        now: NaiveDateTime,
    ) -> Result<PrayerReport, ScheduleUnavailable> {
        let location = self.resolve_location(raw).await;
        let schedule = self.schedule_for(&location, now.date()).await?;
        let state = ScheduleClock::derive(&schedule, now.time());
        let qibla = self.qibla(&location);
        Ok(PrayerReport {
            location,
            schedule,
            state,
            qibla,
        })
    }
}
