//! namazio library: daily Islamic prayer times, countdown and Qibla direction
//!
//! Given a device position, the library resolves it to a place (falling back
//! to Ankara when the position is unusable or outside Türkiye), fetches that
//! day's six prayer boundaries once per date, tells which interval "now" is
//! in and how long until the next one, and computes the Qibla bearing and
//! distance to the Kaaba.
//!
//! # Example
//!
//! ```no_run
//! use namazio::{run_report, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     latitude: 41.0082,
//!     longitude: 28.9784,
//!     ..Default::default()
//! };
//!
//! let report = run_report(&config).await?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod app;
pub mod config;
pub mod error_handling;
pub mod geo;
pub mod initialization;
pub mod location;
pub mod qibla;
mod run;
pub mod schedule;

// Re-export public API
pub use app::{ScheduleUpdate, SystemClock};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{GeocodeUnavailable, InvalidCoordinate, ScheduleUnavailable};
pub use geo::Coordinate;
pub use location::{LocationResolver, ResolvedLocation};
pub use qibla::{QiblaCalculator, QiblaResult};
pub use run::{init_service, run_report, start_watch, PrayerReport, PrayerService, Watch};
pub use schedule::{DailySchedule, PrayerLabel, PrayerScheduleProvider, ScheduleClock, ScheduleState};
