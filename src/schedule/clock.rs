//! Current interval, next boundary and countdown.
//!
//! [`ScheduleClock::derive`] is a pure function of a schedule and a wall-clock
//! time. It holds no timers; the ticker in `app::ticker` re-invokes it.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use super::types::{ClockTime, DailySchedule, PrayerLabel, MINUTES_PER_DAY};

/// Time left until the next boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Remaining {
    pub hours: u32,
    /// Always within [0, 59]
    pub minutes: u32,
}

impl Remaining {
    fn from_minutes(total: u32) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

impl std::fmt::Display for Remaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.hours, self.minutes) {
            (0, m) => write!(f, "{} dakika", m),
            (h, 0) => write!(f, "{} saat", h),
            (h, m) => write!(f, "{} saat {} dakika", h, m),
        }
    }
}

/// Where "now" falls within a [`DailySchedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleState {
    /// Interval now belongs to. Before Fajr this is the previous day's Isha.
    pub current_label: PrayerLabel,
    pub next_label: PrayerLabel,
    pub next_clock_time: ClockTime,
    pub remaining: Remaining,
    /// Next boundary is tomorrow's Fajr (now is past Isha).
    pub next_is_tomorrow: bool,
}

/// Derives [`ScheduleState`] values.
pub struct ScheduleClock;

impl ScheduleClock {
    /// Locates `now` among the schedule's boundaries.
    ///
    /// A boundary is reached at the exact minute it occurs (`<=`), so the
    /// result does not depend on tick phase. Seconds are ignored.
    pub fn derive(schedule: &DailySchedule, now: NaiveTime) -> ScheduleState {
        let now_minutes = now.hour() * 60 + now.minute();
        let boundaries = schedule.boundaries();

        let upcoming = boundaries
            .iter()
            .find(|b| b.clock_time.minutes_since_midnight() > now_minutes);
        let (next, next_is_tomorrow) = match upcoming {
            Some(b) => (*b, false),
            None => (boundaries[0], true),
        };

        let current_label = boundaries
            .iter()
            .rev()
            .find(|b| b.clock_time.minutes_since_midnight() <= now_minutes)
            .map(|b| b.label)
            .unwrap_or(boundaries[boundaries.len() - 1].label);

        let next_minutes = next.clock_time.minutes_since_midnight();
        let remaining = if next_is_tomorrow {
            next_minutes + MINUTES_PER_DAY - now_minutes
        } else {
            next_minutes - now_minutes
        };

        ScheduleState {
            current_label,
            next_label: next.label,
            next_clock_time: next.clock_time,
            remaining: Remaining::from_minutes(remaining % MINUTES_PER_DAY),
            next_is_tomorrow,
        }
    }
}
