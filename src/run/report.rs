//! One-shot result of [`PrayerService::report`](super::PrayerService::report).

use std::fmt;
use std::sync::Arc;

use crate::location::ResolvedLocation;
use crate::qibla::QiblaResult;
use crate::schedule::{DailySchedule, ScheduleState};

/// Everything needed to render the prayer-times screen.
#[derive(Debug, Clone)]
pub struct PrayerReport {
    pub location: Arc<ResolvedLocation>,
    pub schedule: Arc<DailySchedule>,
    pub state: ScheduleState,
    pub qibla: QiblaResult,
}

impl fmt::Display for PrayerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.location.display_name())?;
        if self.location.is_fallback {
            write!(f, " (approximate)")?;
        }
        writeln!(f, " · {}", self.schedule.date().format("%d.%m.%Y"))?;

        for boundary in self.schedule.boundaries() {
            let marker = if boundary.label == self.state.current_label {
                "▶"
            } else {
                " "
            };
            writeln!(
                f,
                "{} {:<7} {}",
                marker,
                boundary.label.turkish_name(),
                boundary.clock_time
            )?;
        }

        writeln!(
            f,
            "{} vaktine {} kaldı ({})",
            self.state.next_label.turkish_name(),
            self.state.remaining,
            self.state.next_clock_time
        )?;
        write!(f, "{}", self.qibla)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qibla::QiblaCalculator;
    use crate::schedule::{RawTimings, ScheduleClock};
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_display_marks_current_and_fallback() {
        let location = ResolvedLocation::fallback();
        let times = RawTimings::from_strs(["06:05", "07:35", "13:10", "16:20", "18:44", "20:05"])
            .validate()
            .unwrap();
        let schedule = DailySchedule::new(
            NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
            location.clone(),
            times,
        )
        .unwrap();
        let state = ScheduleClock::derive(&schedule, NaiveTime::from_hms_opt(21, 0, 0).unwrap());
        let report = PrayerReport {
            qibla: QiblaCalculator::new().compute(&location.coordinate),
            location: Arc::new(location),
            schedule: Arc::new(schedule),
            state,
        };

        let text = report.to_string();
        assert!(text.starts_with("Çankaya, Ankara (approximate) · 20.03.2026"));
        assert!(text.contains("▶ Yatsı"));
        assert!(text.contains("İmsak vaktine 9 saat 5 dakika kaldı (06:05)"));
        assert!(text.contains("Kıble yönü: 160°"));
    }
}
