//! Daily prayer schedule.
//!
//! This module provides:
//! - The schedule data model (`PrayerLabel`, `ClockTime`, `DailySchedule`)
//! - `PrayerScheduleProvider`, a single-slot same-day cache over a `TimingsProvider`
//! - `AladhanClient`, the HTTP `TimingsProvider`
//! - `ScheduleStore`, optional persistence of the resident schedule
//! - `ScheduleClock`, which locates "now" within a schedule

mod aladhan;
mod clock;
mod provider;
mod store;
mod types;

// Re-export public API
pub use aladhan::AladhanClient;
pub use clock::{Remaining, ScheduleClock, ScheduleState};
pub use provider::{PrayerScheduleProvider, TimingsProvider};
pub use store::ScheduleStore;
pub use types::{ClockTime, DailySchedule, PrayerBoundary, PrayerLabel, RawTimings, MINUTES_PER_DAY};
