//! Error handling.
//!
//! This module provides:
//! - Error type definitions for each failure class
//! - Retry strategy configuration for schedule fetches
//!
//! Failure classes are handled asymmetrically:
//! - **Geocoding** failures are absorbed by substituting the fallback location
//! - **Schedule** failures propagate to the caller for explicit retry
//! - **Invalid coordinates** are rejected before entering the core

mod categorization;
mod types;

// Re-export public API
pub use categorization::get_retry_strategy;
pub use types::{GeocodeUnavailable, InitializationError, InvalidCoordinate, ScheduleUnavailable};
