//! Shared constants: defaults and validation limits.

/// Obstruction height in meters assumed for any compass octant a place has
/// no survey data for.
pub const DEFAULT_BLOCKER_HEIGHT: f64 = 10.0;

/// Assumed horizontal distance in meters from a place to the obstruction in
/// the sun's current octant.
pub const DEFAULT_BLOCKER_DISTANCE: f64 = 10.0;

/// Upper sanity bound on obstruction heights accepted at import (meters).
pub const MAXIMUM_BLOCKER_HEIGHT: f64 = 10_000.0;

/// ΔT (TT − UT1) in seconds passed to the SPA calculation. A fixed estimate
/// is accurate to well under a second of solar motion for current years.
pub const DELTA_T_SECONDS: f64 = 69.0;

/// Standard atmospheric pressure in millibars, for refraction correction.
pub const STANDARD_PRESSURE: f64 = 1013.25;

/// Standard air temperature in °C, for refraction correction.
pub const STANDARD_TEMPERATURE: f64 = 15.0;

pub const DEFAULT_LISTEN_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_LISTEN_PORT: u16 = 8000;
pub const DEFAULT_DB_FILE: &str = "places.db";

/// Minutes in a day; the time-of-day control ranges over `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: u32 = 1440;

pub const EXIT_FAILURE: i32 = 1;
