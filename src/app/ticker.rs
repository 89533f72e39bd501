//! Recurring schedule-state derivation.
//!
//! A background task that wakes on a fixed period, reads the local wall
//! clock, refreshes the schedule when the calendar date has rolled over, and
//! publishes the derived [`ScheduleState`] to a channel.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, error, info};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_retry::RetryIf;
use tokio_util::sync::CancellationToken;

use crate::error_handling::{get_retry_strategy, ScheduleUnavailable};
use crate::location::ResolvedLocation;
use crate::run::PrayerService;
use crate::schedule::{DailySchedule, ScheduleClock, ScheduleState};

/// Source of the local wall-clock time.
pub trait LocalClock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The system clock in the local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl LocalClock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock that only moves when told to. Used for `--at` and in tests.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        let mut guard = match self.now.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = now;
    }
}

impl LocalClock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Message published by the ticker.
#[derive(Debug, Clone)]
pub enum ScheduleUpdate {
    /// A schedule for a new date became resident.
    Schedule(Arc<DailySchedule>),
    /// State derived on a tick.
    State(ScheduleState),
    /// The schedule for `date` could not be obtained; retried on the next tick.
    Unavailable { date: NaiveDate, reason: String },
}

/// Fetches the schedule, retrying transient failures with exponential backoff.
pub async fn fetch_with_retry(
    service: &PrayerService,
    location: &ResolvedLocation,
    date: NaiveDate,
) -> Result<Arc<DailySchedule>, ScheduleUnavailable> {
    RetryIf::spawn(
        get_retry_strategy(),
        || service.schedule_for(location, date),
        ScheduleUnavailable::is_transient,
    )
    .await
}

/// Spawns the ticker task.
///
/// The first tick fires immediately. The task ends when `cancel` fires or
/// when `updates` has no receiver left.
pub fn spawn_schedule_ticker(
    service: Arc<PrayerService>,
    location: ResolvedLocation,
    clock: Arc<dyn LocalClock>,
    period: Duration,
    updates: mpsc::Sender<ScheduleUpdate>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut schedule: Option<Arc<DailySchedule>> = None;

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = cancel.cancelled() => {
                    debug!("Schedule ticker cancelled");
                    break;
                }
            }

            let now = clock.now();
            let today = now.date();

            if schedule.as_ref().map(|s| s.date()) != Some(today) {
                // Never derive against another day's boundaries
                schedule = None;
                let fetched = tokio::select! {
                    result = fetch_with_retry(&service, &location, today) => result,
                    _ = cancel.cancelled() => {
                        debug!("Schedule ticker cancelled during fetch");
                        break;
                    }
                };
                let update = match fetched {
                    Ok(fresh) => {
                        info!("Schedule for {} is resident", today);
                        schedule = Some(Arc::clone(&fresh));
                        ScheduleUpdate::Schedule(fresh)
                    }
                    Err(e) => {
                        error!("Schedule for {} unavailable: {}", today, e);
                        ScheduleUpdate::Unavailable {
                            date: today,
                            reason: e.to_string(),
                        }
                    }
                };
                if updates.send(update).await.is_err() {
                    break;
                }
            }

            if let Some(current) = &schedule {
                let state = ScheduleClock::derive(current, now.time());
                if updates.send(ScheduleUpdate::State(state)).await.is_err() {
                    debug!("Schedule update receiver dropped, stopping ticker");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationResolver;
    use crate::schedule::{PrayerLabel, PrayerScheduleProvider, RawTimings, TimingsProvider};
    use crate::geo::Coordinate;
    use crate::location::{GeocodedAddress, ReverseGeocodeProvider};
    use crate::error_handling::GeocodeUnavailable;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NoGeocoder;

    #[async_trait]
    impl ReverseGeocodeProvider for NoGeocoder {
        async fn reverse_geocode(
            &self,
            _coordinate: Coordinate,
        ) -> Result<GeocodedAddress, GeocodeUnavailable> {
            Err(GeocodeUnavailable::TimedOut)
        }
    }

    struct CountingTimings {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl TimingsProvider for CountingTimings {
        async fn fetch(
            &self,
            _coordinate: Coordinate,
            _date: NaiveDate,
        ) -> Result<RawTimings, ScheduleUnavailable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ScheduleUnavailable::MissingBoundary(PrayerLabel::Fajr));
            }
            Ok(RawTimings::from_strs([
                "05:00", "06:30", "12:00", "15:30", "18:45", "20:15",
            ]))
        }
    }

    fn service(fail: bool) -> (Arc<PrayerService>, Arc<CountingTimings>) {
        let timings = Arc::new(CountingTimings {
            calls: AtomicUsize::new(0),
            fail,
        });
        let service = PrayerService::new(
            LocationResolver::new(Arc::new(NoGeocoder)),
            PrayerScheduleProvider::new(timings.clone()),
        );
        (Arc::new(service), timings)
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_ticker_publishes_schedule_then_state() {
        let (service, _) = service(false);
        let clock = Arc::new(FixedClock::new(at(20, 13, 0)));
        let (tx, mut rx) = mpsc::channel(8);
        let cancel = CancellationToken::new();
        let handle = spawn_schedule_ticker(
            service,
            ResolvedLocation::fallback(),
            clock,
            Duration::from_millis(10),
            tx,
            cancel.clone(),
        );

        match rx.recv().await {
            Some(ScheduleUpdate::Schedule(s)) => assert_eq!(s.date(), at(20, 0, 0).date()),
            other => panic!("expected schedule, got {:?}", other),
        }
        match rx.recv().await {
            Some(ScheduleUpdate::State(state)) => {
                assert_eq!(state.current_label, PrayerLabel::Dhuhr);
                assert_eq!(state.next_label, PrayerLabel::Asr);
            }
            other => panic!("expected state, got {:?}", other),
        }

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_ticker_refetches_on_date_rollover() {
        let (service, timings) = service(false);
        let clock = Arc::new(FixedClock::new(at(20, 23, 59)));
        let (tx, mut rx) = mpsc::channel(8);
        let cancel = CancellationToken::new();
        let handle = spawn_schedule_ticker(
            service,
            ResolvedLocation::fallback(),
            clock.clone(),
            Duration::from_millis(10),
            tx,
            cancel.clone(),
        );

        assert!(matches!(rx.recv().await, Some(ScheduleUpdate::Schedule(_))));
        assert!(matches!(rx.recv().await, Some(ScheduleUpdate::State(_))));

        clock.set(at(21, 0, 1));
        loop {
            match rx.recv().await {
                Some(ScheduleUpdate::Schedule(s)) => {
                    assert_eq!(s.date(), at(21, 0, 0).date());
                    break;
                }
                Some(_) => continue,
                None => panic!("ticker stopped"),
            }
        }
        assert_eq!(timings.calls.load(Ordering::SeqCst), 2);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_ticker_reports_unavailable_without_state() {
        let (service, _) = service(true);
        let clock = Arc::new(FixedClock::new(at(20, 13, 0)));
        let (tx, mut rx) = mpsc::channel(8);
        let cancel = CancellationToken::new();
        let handle = spawn_schedule_ticker(
            service,
            ResolvedLocation::fallback(),
            clock,
            Duration::from_millis(10),
            tx,
            cancel.clone(),
        );

        for _ in 0..2 {
            assert!(matches!(
                rx.recv().await,
                Some(ScheduleUpdate::Unavailable { .. })
            ));
        }

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_ticker_stops_when_receiver_dropped() {
        let (service, _) = service(false);
        let clock = Arc::new(FixedClock::new(at(20, 13, 0)));
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let handle = spawn_schedule_ticker(
            service,
            ResolvedLocation::fallback(),
            clock,
            Duration::from_millis(10),
            tx,
            CancellationToken::new(),
        );
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("ticker should stop")
            .unwrap();
    }
}
