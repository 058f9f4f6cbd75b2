//! Sunlight visibility evaluation.
//!
//! Decides whether a place is in direct sun at a given instant by comparing
//! the sun's altitude against the obstruction height recorded for the octant
//! the sun currently occupies. Only that single octant is checked, not a
//! full horizon profile; the result is a deliberate approximation suited to
//! the eight-direction survey data the places carry.
//!
//! The evaluation is a pure function of the place, the instant, and the
//! solar position provider. It holds no mutable state and produces no side
//! effects, so evaluations are independent and freely parallelizable.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::constants::{DEFAULT_BLOCKER_DISTANCE, DEFAULT_BLOCKER_HEIGHT};
use crate::place::{Direction, Place};
use crate::solar::{SolarPosition, SunPositionProvider};

/// Failure modes of a single place evaluation.
///
/// Neither variant is fatal to a batch: callers skip the place and report
/// the result as unknown.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The place lacks usable coordinates or carries malformed obstruction
    /// data.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The solar position provider failed.
    #[error("solar position computation failed: {0}")]
    Computation(String),
}

/// Named parameters for the shade geometry.
///
/// `default_blocker_height` substitutes for octants missing from a place's
/// survey; `blocker_distance` is the assumed horizontal distance from the
/// place to whatever blocks it in the sun's direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunlightParams {
    /// Meters of obstruction assumed where no survey data exists.
    pub default_blocker_height: f64,
    /// Assumed place-to-obstruction distance in meters.
    pub blocker_distance: f64,
}

impl Default for SunlightParams {
    fn default() -> Self {
        Self {
            default_blocker_height: DEFAULT_BLOCKER_HEIGHT,
            blocker_distance: DEFAULT_BLOCKER_DISTANCE,
        }
    }
}

/// Evaluates sun-or-shade for places against a solar position provider.
#[derive(Debug, Clone)]
pub struct Evaluator<P> {
    provider: P,
    params: SunlightParams,
}

impl<P: SunPositionProvider> Evaluator<P> {
    pub fn new(provider: P) -> Self {
        Self::with_params(provider, SunlightParams::default())
    }

    pub fn with_params(provider: P, params: SunlightParams) -> Self {
        Self { provider, params }
    }

    pub fn params(&self) -> SunlightParams {
        self.params
    }

    /// Is the place in direct sunlight at `at`?
    ///
    /// Obtains the solar position for the instant and coordinate, quantizes
    /// the sun's bearing to a compass octant, and compares the sun's
    /// altitude against the elevation angle subtended by the obstruction
    /// recorded for that octant. Equality counts as shade.
    ///
    /// Night needs no special case: validated obstruction heights are
    /// non-negative, so the required angle is always in [0°, 90°) and a sun
    /// at or below the horizon can never exceed it.
    pub fn is_in_sun(&self, place: &Place, at: DateTime<Utc>) -> Result<bool, EvaluationError> {
        place.validate()?;
        let position = self
            .provider
            .position(at, place.location.lat, place.location.lng)?;
        Ok(self.is_lit_by(place, position))
    }

    /// Core comparison against an already-computed solar position.
    pub fn is_lit_by(&self, place: &Place, position: SolarPosition) -> bool {
        let altitude_deg = position.altitude_degrees();
        let direction = Direction::from_bearing(position.bearing_degrees());
        let blocker_height = place
            .surrounding_heights
            .get(direction)
            .unwrap_or(self.params.default_blocker_height);
        let required_deg = blocker_height
            .atan2(self.params.blocker_distance)
            .to_degrees();
        altitude_deg > required_deg
    }
}
