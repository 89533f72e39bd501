//! Daily schedule data structures.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::error_handling::ScheduleUnavailable;
use crate::location::ResolvedLocation;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// The six daily boundaries, in their fixed chronological order.
///
/// Declaration order is the order the boundaries occur within a day; both
/// the derived `Ord` and `PrayerLabel::iter()` follow it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum PrayerLabel {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerLabel {
    /// Key used by timing providers.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerLabel::Fajr => "Fajr",
            PrayerLabel::Sunrise => "Sunrise",
            PrayerLabel::Dhuhr => "Dhuhr",
            PrayerLabel::Asr => "Asr",
            PrayerLabel::Maghrib => "Maghrib",
            PrayerLabel::Isha => "Isha",
        }
    }

    /// Name shown to users.
    pub fn turkish_name(&self) -> &'static str {
        match self {
            PrayerLabel::Fajr => "İmsak",
            PrayerLabel::Sunrise => "Güneş",
            PrayerLabel::Dhuhr => "Öğle",
            PrayerLabel::Asr => "İkindi",
            PrayerLabel::Maghrib => "Akşam",
            PrayerLabel::Isha => "Yatsı",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for PrayerLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A local wall-clock time with minute precision.
///
/// Serialized as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Parses the leading `HH:MM` of a provider string.
    ///
    /// Anything after the fifth character (e.g. a `" (+03)"` zone suffix) is
    /// ignored. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let head = value.get(..5)?;
        let (h, m) = head.split_once(':')?;
        if h.len() != 2 || m.len() != 2 {
            return None;
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        let rest = &value[5..];
        if rest.starts_with(|c: char| c.is_ascii_digit() || c == ':') {
            return None;
        }
        Self::new(h.parse().ok()?, m.parse().ok()?)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }
}

impl TryFrom<String> for ClockTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ClockTime::parse(&value).ok_or_else(|| format!("invalid clock time '{}'", value))
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// One named boundary and the wall-clock time it occurs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerBoundary {
    pub label: PrayerLabel,
    pub clock_time: ClockTime,
}

/// Provider payload before validation: one optional string per boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTimings {
    #[serde(rename = "Fajr")]
    pub fajr: Option<String>,
    #[serde(rename = "Sunrise")]
    pub sunrise: Option<String>,
    #[serde(rename = "Dhuhr")]
    pub dhuhr: Option<String>,
    #[serde(rename = "Asr")]
    pub asr: Option<String>,
    #[serde(rename = "Maghrib")]
    pub maghrib: Option<String>,
    #[serde(rename = "Isha")]
    pub isha: Option<String>,
}

impl RawTimings {
    /// Builds a payload with every boundary present.
    pub fn from_strs(times: [&str; 6]) -> Self {
        let [fajr, sunrise, dhuhr, asr, maghrib, isha] = times.map(|t| Some(t.to_string()));
        Self {
            fajr,
            sunrise,
            dhuhr,
            asr,
            maghrib,
            isha,
        }
    }

    pub fn get(&self, label: PrayerLabel) -> Option<&str> {
        let value = match label {
            PrayerLabel::Fajr => &self.fajr,
            PrayerLabel::Sunrise => &self.sunrise,
            PrayerLabel::Dhuhr => &self.dhuhr,
            PrayerLabel::Asr => &self.asr,
            PrayerLabel::Maghrib => &self.maghrib,
            PrayerLabel::Isha => &self.isha,
        };
        value.as_deref()
    }

    /// Checks presence, format and strict ordering of all six boundaries.
    pub fn validate(&self) -> Result<[ClockTime; 6], ScheduleUnavailable> {
        let mut times = [ClockTime { hour: 0, minute: 0 }; 6];
        for label in PrayerLabel::iter() {
            let raw = self
                .get(label)
                .ok_or(ScheduleUnavailable::MissingBoundary(label))?;
            times[label.index()] =
                ClockTime::parse(raw).ok_or_else(|| ScheduleUnavailable::InvalidClockTime {
                    label,
                    value: raw.to_string(),
                })?;
        }
        check_strictly_increasing(&times)?;
        Ok(times)
    }
}

fn check_strictly_increasing(times: &[ClockTime; 6]) -> Result<(), ScheduleUnavailable> {
    for (earlier, later) in PrayerLabel::iter().zip(PrayerLabel::iter().skip(1)) {
        if times[later.index()] <= times[earlier.index()] {
            return Err(ScheduleUnavailable::OutOfOrder { earlier, later });
        }
    }
    Ok(())
}

/// The six boundaries for one calendar date at one location.
///
/// Boundaries are strictly increasing within the day. Instances are never
/// mutated; a new date produces a new schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredSchedule")]
pub struct DailySchedule {
    date: NaiveDate,
    location: ResolvedLocation,
    boundaries: [PrayerBoundary; 6],
}

#[derive(Deserialize)]
struct StoredSchedule {
    date: NaiveDate,
    location: ResolvedLocation,
    boundaries: [PrayerBoundary; 6],
}

impl TryFrom<StoredSchedule> for DailySchedule {
    type Error = String;

    fn try_from(stored: StoredSchedule) -> Result<Self, Self::Error> {
        for (label, boundary) in PrayerLabel::iter().zip(stored.boundaries.iter()) {
            if boundary.label != label {
                return Err(format!("expected {} but found {}", label, boundary.label));
            }
        }
        let times = stored.boundaries.map(|b| b.clock_time);
        DailySchedule::new(stored.date, stored.location, times).map_err(|e| e.to_string())
    }
}

impl DailySchedule {
    /// Builds a schedule from times given in chronological label order.
    pub fn new(
        date: NaiveDate,
        location: ResolvedLocation,
        times: [ClockTime; 6],
    ) -> Result<Self, ScheduleUnavailable> {
        check_strictly_increasing(&times)?;
        let mut boundaries = times.map(|clock_time| PrayerBoundary {
            label: PrayerLabel::Fajr,
            clock_time,
        });
        for (boundary, label) in boundaries.iter_mut().zip(PrayerLabel::iter()) {
            boundary.label = label;
        }
        Ok(Self {
            date,
            location,
            boundaries,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn location(&self) -> &ResolvedLocation {
        &self.location
    }

    pub fn boundaries(&self) -> &[PrayerBoundary; 6] {
        &self.boundaries
    }

    pub fn boundary(&self, label: PrayerLabel) -> PrayerBoundary {
        self.boundaries[label.index()]
    }
}
