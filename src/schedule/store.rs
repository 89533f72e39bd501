//! Persisted same-day schedule.
//!
//! Lets a restarted process reuse today's schedule without a network fetch.
//! An entry is valid only for the calendar date and the coordinate it was
//! fetched for.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::types::DailySchedule;
use crate::config::SCHEDULE_CACHE_FILE;
use crate::geo::Coordinate;

/// On-disk envelope around a schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    date: NaiveDate,
    cached_at: SystemTime,
    schedule: DailySchedule,
}

/// Single-file schedule store under a cache directory.
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    dir: PathBuf,
}

impl ScheduleStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file(&self) -> PathBuf {
        self.dir.join(SCHEDULE_CACHE_FILE)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads the stored schedule if it was fetched for `date` at `coordinate`.
    ///
    /// An entry for any other date or place is deleted and `Ok(None)` returned.
    pub fn load(&self, date: NaiveDate, coordinate: &Coordinate) -> Result<Option<DailySchedule>> {
        let file = self.file();
        if !file.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&file).context("Failed to read schedule cache")?;
        let entry: StoredEntry =
            serde_json::from_str(&content).context("Failed to parse schedule cache")?;

        if entry.date != date || entry.schedule.date() != date {
            debug!(
                "Discarding stored schedule for {} (requested {})",
                entry.date, date
            );
            let _ = std::fs::remove_file(&file);
            return Ok(None);
        }

        if entry.schedule.location().coordinate != *coordinate {
            debug!(
                "Discarding stored schedule for {} (requested {})",
                entry.schedule.location().coordinate,
                coordinate
            );
            let _ = std::fs::remove_file(&file);
            return Ok(None);
        }

        Ok(Some(entry.schedule))
    }

    /// Replaces the stored entry with `schedule`.
    pub fn save(&self, schedule: &DailySchedule) -> Result<()> {
        std::fs::create_dir_all(&self.dir).context("Failed to create cache directory")?;

        let entry = StoredEntry {
            date: schedule.date(),
            cached_at: SystemTime::now(),
            schedule: schedule.clone(),
        };
        let content =
            serde_json::to_string_pretty(&entry).context("Failed to serialize schedule")?;

        // Write-then-rename so a reader never sees a half-written file
        let tmp = self.dir.join(format!("{}.tmp", SCHEDULE_CACHE_FILE));
        std::fs::write(&tmp, content).context("Failed to write schedule cache")?;
        std::fs::rename(&tmp, self.file()).context("Failed to replace schedule cache")?;

        Ok(())
    }

    /// Removes any stored entry.
    pub fn clear(&self) -> Result<()> {
        let file = self.file();
        if file.exists() {
            std::fs::remove_file(&file).context("Failed to remove schedule cache")?;
        }
        Ok(())
    }
}
