//! Same-day cached schedule retrieval.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info, warn};

use super::store::ScheduleStore;
use super::types::{DailySchedule, RawTimings};
use crate::app::GenerationSlot;
use crate::error_handling::ScheduleUnavailable;
use crate::geo::Coordinate;
use crate::location::ResolvedLocation;

/// Source of raw daily timings for a coordinate and date.
///
/// Implementations perform a single request per call; validation happens in
/// [`PrayerScheduleProvider`], not here.
#[async_trait]
pub trait TimingsProvider: Send + Sync {
    async fn fetch(
        &self,
        coordinate: Coordinate,
        date: NaiveDate,
    ) -> Result<RawTimings, ScheduleUnavailable>;
}

/// Returns today's [`DailySchedule`], fetching at most once per date.
///
/// Holds a single cache slot. A schedule for a different date or a different
/// coordinate is never returned; a successful fetch replaces the slot wholesale.
pub struct PrayerScheduleProvider {
    timings: Arc<dyn TimingsProvider>,
    slot: GenerationSlot<DailySchedule>,
    store: Option<ScheduleStore>,
}

impl PrayerScheduleProvider {
    pub fn new(timings: Arc<dyn TimingsProvider>) -> Self {
        Self {
            timings,
            slot: GenerationSlot::new(),
            store: None,
        }
    }

    /// Persists the resident schedule so it survives a restart on the same day.
    pub fn with_store(mut self, store: ScheduleStore) -> Self {
        self.store = Some(store);
        self
    }

    /// The resident schedule if it is for `date` at `location`.
    pub fn cached(
        &self,
        location: &ResolvedLocation,
        date: NaiveDate,
    ) -> Option<Arc<DailySchedule>> {
        self.slot
            .current()
            .filter(|s| s.date() == date && s.location().coordinate == location.coordinate)
    }

    /// Drops the resident schedule (e.g. after the device moved).
    ///
    /// Fetches still in flight are superseded and will not repopulate the slot.
    pub fn invalidate(&self) {
        self.slot.supersede();
        if let Some(store) = &self.store {
            if let Err(e) = store.clear() {
                warn!("Failed to clear persisted schedule: {:#}", e);
            }
        }
    }

    fn load_persisted(&self, location: &ResolvedLocation, date: NaiveDate) -> Option<DailySchedule> {
        let store = self.store.as_ref()?;
        match store.load(date, &location.coordinate) {
            Ok(found) => found,
            Err(e) => {
                warn!("Ignoring unreadable persisted schedule: {:#}", e);
                None
            }
        }
    }

    /// Gets the schedule for `date` at `location`.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleUnavailable` if the provider fails or its data is
    /// incomplete or out of order. Invalid data is never cached.
    pub async fn get_schedule(
        &self,
        location: &ResolvedLocation,
        date: NaiveDate,
    ) -> Result<Arc<DailySchedule>, ScheduleUnavailable> {
        if let Some(schedule) = self.cached(location, date) {
            debug!("Schedule cache hit for {}", date);
            return Ok(schedule);
        }

        let generation = self.slot.begin();

        if let Some(schedule) = self.load_persisted(location, date) {
            debug!("Loaded persisted schedule for {}", date);
            let schedule = Arc::new(schedule);
            self.slot.publish(generation, Arc::clone(&schedule));
            return Ok(schedule);
        }

        info!(
            "Fetching prayer times for {} on {}",
            location.display_name(),
            date
        );
        let raw = self.timings.fetch(location.coordinate, date).await?;
        let times = raw.validate()?;
        let schedule = Arc::new(DailySchedule::new(date, location.clone(), times)?);

        if self.slot.publish(generation, Arc::clone(&schedule)) {
            if let Some(store) = &self.store {
                if let Err(e) = store.save(&schedule) {
                    warn!("Failed to persist schedule for {}: {:#}", date, e);
                }
            }
        } else {
            debug!("Schedule fetch for {} was superseded, not caching", date);
        }

        Ok(schedule)
    }
}
