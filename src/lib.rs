//! # Sunnyside Library
//!
//! Internal library for the sunnyside binary: decides whether mapped
//! outdoor places are in direct sunlight or shade at a given instant, and
//! serves the results over a small HTTP API for a map front end with a
//! time-of-day control.
//!
//! ## Architecture
//!
//! - **Core**: [`sunlight`] evaluates sun-or-shade per place from the sun's
//!   position and the place's eight-direction obstruction survey
//! - **Astronomy**: [`solar`] provides solar positions behind a trait,
//!   backed by the NREL SPA algorithm
//! - **Data**: [`place`] models place documents, [`repository`] stores them
//!   in SQLite, [`import`] fills the store from CSV exports
//! - **Boundary**: [`api`] is the HTTP presentation surface
//! - **Infrastructure**: [`config`], [`args`], [`logger`], [`constants`],
//!   [`utils`]

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod api;
pub mod args;
pub mod config;
pub mod constants;
pub mod import;
pub mod place;
pub mod repository;
pub mod solar;
pub mod sunlight;
pub mod utils;

// Re-exports for the binary and integration tests
pub use place::{Direction, Place};
pub use solar::{SolarPosition, SpaProvider, SunPositionProvider};
pub use sunlight::{EvaluationError, Evaluator, SunlightParams};
