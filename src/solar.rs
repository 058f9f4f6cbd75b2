//! Solar position provider.
//!
//! The evaluator depends on a small trait so the astronomy can be swapped
//! out (or mocked) without touching the shade geometry. The production
//! implementation wraps the `solar_positioning` crate's SPA algorithm
//! (Reda & Andreas, NREL).

use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use solar_positioning::spa;

use crate::constants::{DELTA_T_SECONDS, STANDARD_PRESSURE, STANDARD_TEMPERATURE};
use crate::sunlight::EvaluationError;

/// The sun's position for one instant at one coordinate.
///
/// Angles use the convention the evaluator's bearing shift assumes:
/// azimuth in radians with 0 pointing due south, increasing clockwise
/// towards west; altitude in radians above the horizon, negative when the
/// sun is below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    pub azimuth: f64,
    pub altitude: f64,
}

impl SolarPosition {
    /// Compass bearing in degrees: 0°/360° = true north, clockwise.
    pub fn bearing_degrees(&self) -> f64 {
        self.azimuth.to_degrees() + 180.0
    }

    pub fn altitude_degrees(&self) -> f64 {
        self.altitude.to_degrees()
    }

    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }
}

/// Source of solar positions.
#[cfg_attr(test, automock)]
pub trait SunPositionProvider {
    /// Solar position at `at` as seen from `(lat, lng)` in decimal degrees.
    fn position(
        &self,
        at: DateTime<Utc>,
        lat: f64,
        lng: f64,
    ) -> Result<SolarPosition, EvaluationError>;
}

/// SPA-backed provider. Stateless; an instance can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaProvider;

impl SunPositionProvider for SpaProvider {
    fn position(
        &self,
        at: DateTime<Utc>,
        lat: f64,
        lng: f64,
    ) -> Result<SolarPosition, EvaluationError> {
        let position = spa::solar_position(
            at,
            lat,
            lng,
            0.0, // observer elevation (m)
            DELTA_T_SECONDS,
            STANDARD_PRESSURE,
            STANDARD_TEMPERATURE,
        )
        .map_err(|e| EvaluationError::Computation(e.to_string()))?;

        // SPA reports a north-referenced bearing in degrees; shift back to
        // the south-referenced radian convention of this interface.
        Ok(SolarPosition {
            azimuth: (position.azimuth() - 180.0).to_radians(),
            altitude: position.elevation_angle().to_radians(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bearing_shift_round_trips() {
        // South-referenced 0 rad is a 180° compass bearing.
        let south = SolarPosition {
            azimuth: 0.0,
            altitude: 0.5,
        };
        assert!((south.bearing_degrees() - 180.0).abs() < 1e-12);

        let east = SolarPosition {
            azimuth: (-90.0_f64).to_radians(),
            altitude: 0.5,
        };
        assert!((east.bearing_degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn noon_sun_in_madrid_midsummer_is_high_and_southish() {
        let at = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
        let pos = SpaProvider.position(at, 40.4168, -3.7038).unwrap();
        assert!(pos.is_above_horizon());
        assert!(
            pos.altitude_degrees() > 60.0,
            "expected high sun, got {}°",
            pos.altitude_degrees()
        );
        // Shortly before local solar noon the sun stands in the SE..SW span.
        let bearing = pos.bearing_degrees();
        assert!(
            (90.0..270.0).contains(&bearing),
            "expected southern bearing, got {bearing}°"
        );
    }

    #[test]
    fn midnight_sun_in_madrid_is_below_horizon() {
        let at = Utc.with_ymd_and_hms(2025, 6, 20, 22, 0, 0).unwrap();
        let pos = SpaProvider.position(at, 40.4168, -3.7038).unwrap();
        assert!(!pos.is_above_horizon());
    }

    #[test]
    fn out_of_range_coordinates_error() {
        let at = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
        assert!(matches!(
            SpaProvider.position(at, 95.0, 0.0),
            Err(EvaluationError::Computation(_))
        ));
    }
}
