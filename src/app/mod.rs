//! Application runtime support.
//!
//! This module provides generation-tagged value slots, the recurring
//! schedule ticker, and shutdown handling.

pub mod generation;
pub mod shutdown;
pub mod ticker;

// Re-export public API
pub use generation::{Generation, GenerationSlot};
pub use shutdown::shutdown_gracefully;
pub use ticker::{
    fetch_with_retry, spawn_schedule_ticker, FixedClock, LocalClock, ScheduleUpdate, SystemClock,
};
