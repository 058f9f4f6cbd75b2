//! Property tests for the sunlight evaluation formula.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use sunnyside::place::{Direction, Location, Place, SurroundingHeights};
use sunnyside::solar::{SolarPosition, SpaProvider, SunPositionProvider};
use sunnyside::sunlight::{EvaluationError, Evaluator};

/// Provider returning one fixed position regardless of time and place.
struct FixedProvider(SolarPosition);

impl SunPositionProvider for FixedProvider {
    fn position(
        &self,
        _at: DateTime<Utc>,
        _lat: f64,
        _lng: f64,
    ) -> Result<SolarPosition, EvaluationError> {
        Ok(self.0)
    }
}

fn place_with_heights(heights: SurroundingHeights) -> Place {
    Place {
        id: "prop".into(),
        name: "Property place".into(),
        description: None,
        place_type: None,
        phone: None,
        url: None,
        google_maps_location: None,
        date_added: None,
        hours: None,
        location: Location {
            lat: 40.4168,
            lng: -3.7038,
        },
        surrounding_heights: heights,
    }
}

/// South-referenced radian position from compass bearing and altitude in degrees.
fn position(bearing_deg: f64, altitude_deg: f64) -> SolarPosition {
    SolarPosition {
        azimuth: (bearing_deg - 180.0).to_radians(),
        altitude: altitude_deg.to_radians(),
    }
}

fn heights_strategy() -> impl Strategy<Value = SurroundingHeights> {
    proptest::collection::vec(0.0..500.0f64, 8).prop_map(|values| {
        let mut heights = SurroundingHeights::new();
        for (direction, height) in Direction::ALL.into_iter().zip(values) {
            heights.set(direction, height);
        }
        heights
    })
}

proptest! {
    /// A sun at or below the horizon never counts as direct light, for any
    /// non-negative obstruction survey. This is what makes an explicit
    /// night guard unnecessary.
    #[test]
    fn night_is_never_sunlit(
        bearing in 0.0..360.0f64,
        altitude in -90.0..=0.0f64,
        heights in heights_strategy()
    ) {
        let place = place_with_heights(heights);
        let at = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
        let evaluator = Evaluator::new(FixedProvider(position(bearing, altitude)));
        prop_assert!(!evaluator.is_in_sun(&place, at).unwrap());
    }

    /// With a zero-height blocker in the sun's octant the decision reduces
    /// to the altitude's sign.
    #[test]
    fn zero_blocker_reduces_to_horizon_test(
        bearing in 0.0..360.0f64,
        altitude in -90.0..90.0f64
    ) {
        let mut heights = SurroundingHeights::new();
        for direction in Direction::ALL {
            heights.set(direction, 0.0);
        }
        let place = place_with_heights(heights);
        let at = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
        let evaluator = Evaluator::new(FixedProvider(position(bearing, altitude)));
        let lit = evaluator.is_in_sun(&place, at).unwrap();
        prop_assert_eq!(lit, altitude > 0.0);
    }

    /// An empty survey behaves identically to a survey filled with the
    /// default height in every octant.
    #[test]
    fn empty_survey_equals_explicit_default(
        bearing in 0.0..360.0f64,
        altitude in -90.0..90.0f64
    ) {
        let empty = place_with_heights(SurroundingHeights::new());
        let mut filled_heights = SurroundingHeights::new();
        for direction in Direction::ALL {
            filled_heights.set(direction, sunnyside::constants::DEFAULT_BLOCKER_HEIGHT);
        }
        let filled = place_with_heights(filled_heights);

        let at = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
        let evaluator = Evaluator::new(FixedProvider(position(bearing, altitude)));
        prop_assert_eq!(
            evaluator.is_in_sun(&empty, at).unwrap(),
            evaluator.is_in_sun(&filled, at).unwrap()
        );
    }

    /// Bearing quantization always lands on the octant whose center is
    /// nearest (within 22.5°), and wraps at 360°.
    #[test]
    fn quantization_is_nearest_octant(bearing in 0.0..360.0f64) {
        let direction = Direction::from_bearing(bearing);
        let index = Direction::ALL.iter().position(|d| *d == direction).unwrap();
        let center = index as f64 * 45.0;
        let distance = (bearing - center).abs().min(360.0 - (bearing - center).abs());
        prop_assert!(distance <= 22.5, "bearing {} mapped to {} ({}° away)", bearing, direction, distance);
    }

    /// The real SPA-backed evaluation is deterministic: the same place and
    /// instant always produce the same answer.
    #[test]
    fn evaluation_is_deterministic(
        lat in -60.0..60.0f64,
        lng in -180.0..180.0f64,
        minutes in 0i64..1440,
        heights in heights_strategy()
    ) {
        let mut place = place_with_heights(heights);
        place.location = Location { lat, lng };
        let at = Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap()
            + chrono::Duration::minutes(minutes);

        let evaluator = Evaluator::new(SpaProvider);
        let first = evaluator.is_in_sun(&place, at).unwrap();
        let second = evaluator.is_in_sun(&place, at).unwrap();
        prop_assert_eq!(first, second);
    }
}
