//! End-to-end evaluation scenarios against the real SPA provider.

use chrono::{DateTime, TimeZone, Utc};

use sunnyside::place::{Direction, Location, Place, SurroundingHeights};
use sunnyside::solar::{SolarPosition, SunPositionProvider};
use sunnyside::sunlight::{EvaluationError, Evaluator, SunlightParams};
use sunnyside::SpaProvider;

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

/// Madrid city center.
fn madrid(heights: SurroundingHeights) -> Place {
    Place {
        id: "madrid".into(),
        name: "Madrid terrace".into(),
        description: None,
        place_type: Some("terrace".into()),
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

fn open_heights() -> SurroundingHeights {
    let mut heights = SurroundingHeights::new();
    for direction in Direction::ALL {
        heights.set(direction, 0.0);
    }
    heights
}

#[test]
fn madrid_summer_noon_is_sunlit() {
    // Local solar noon in midsummer; no obstructions anywhere.
    let at = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
    let evaluator = Evaluator::new(SpaProvider);
    assert!(evaluator.is_in_sun(&madrid(open_heights()), at).unwrap());
}

#[test]
fn madrid_midnight_is_dark() {
    // Midnight local (22:00 UTC the evening before), still no obstructions.
    let at = Utc.with_ymd_and_hms(2025, 6, 20, 22, 0, 0).unwrap();
    let evaluator = Evaluator::new(SpaProvider);
    assert!(!evaluator.is_in_sun(&madrid(open_heights()), at).unwrap());
}

#[test]
fn madrid_noon_with_default_heights_is_still_sunlit() {
    // Empty survey means 10 m at 10 m distance, a 45° horizon; the summer
    // noon sun in Madrid stands well above 70°.
    let at = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
    let evaluator = Evaluator::new(SpaProvider);
    assert!(
        evaluator
            .is_in_sun(&madrid(SurroundingHeights::new()), at)
            .unwrap()
    );
}

#[test]
fn skyscraper_in_suns_octant_shades_a_moderate_sun() {
    // requiredAngle = atan2(1000, 10) ≈ 89.4°; a 20° sun loses.
    let mut heights = open_heights();
    heights.set(Direction::S, 1000.0);
    let position = SolarPosition {
        azimuth: 0.0, // due south
        altitude: 20.0_f64.to_radians(),
    };
    let at = Utc.with_ymd_and_hms(2025, 6, 21, 15, 0, 0).unwrap();
    let evaluator = Evaluator::new(FixedProvider(position));
    assert!(!evaluator.is_in_sun(&madrid(heights), at).unwrap());
}

#[test]
fn grazing_light_at_the_obstruction_edge_is_shade() {
    // Around the default 45° required angle the comparison is strict.
    let place = madrid(SurroundingHeights::new());
    let at = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();

    let just_below = SolarPosition {
        azimuth: 0.0,
        altitude: 44.9_f64.to_radians(),
    };
    let just_above = SolarPosition {
        azimuth: 0.0,
        altitude: 45.1_f64.to_radians(),
    };
    assert!(
        !Evaluator::new(FixedProvider(just_below))
            .is_in_sun(&place, at)
            .unwrap()
    );
    assert!(
        Evaluator::new(FixedProvider(just_above))
            .is_in_sun(&place, at)
            .unwrap()
    );
}

#[test]
fn custom_params_change_the_required_angle() {
    // Doubling the assumed distance halves the tangent: a 10 m blocker at
    // 20 m subtends ~26.6°, so a 30° sun now clears it.
    let place = madrid(SurroundingHeights::new());
    let at = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
    let position = SolarPosition {
        azimuth: 0.0,
        altitude: 30.0_f64.to_radians(),
    };

    let default_params = Evaluator::new(FixedProvider(position));
    assert!(!default_params.is_in_sun(&place, at).unwrap());

    let wide = Evaluator::with_params(
        FixedProvider(position),
        SunlightParams {
            default_blocker_height: 10.0,
            blocker_distance: 20.0,
        },
    );
    assert!(wide.is_in_sun(&place, at).unwrap());
}

#[test]
fn malformed_coordinates_are_reported_not_computed() {
    let mut place = madrid(open_heights());
    place.location.lng = -999.0;
    let at = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
    let evaluator = Evaluator::new(SpaProvider);
    assert!(matches!(
        evaluator.is_in_sun(&place, at),
        Err(EvaluationError::InvalidInput(_))
    ));
}
