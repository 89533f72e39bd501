//! Application initialization.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON)
//! - HTTP client used by the geocoding and timings providers

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
