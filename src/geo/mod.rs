//! Coordinates and spherical geodesy.

mod coordinate;
mod geodesy;

pub use coordinate::Coordinate;
pub use geodesy::{great_circle_distance_km, initial_bearing};
