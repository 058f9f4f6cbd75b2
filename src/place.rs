//! Place records and compass direction handling.
//!
//! A [`Place`] mirrors the document layout of the original place store:
//! camelCase field names, a `location` with decimal-degree coordinates, and a
//! `surroundingHeights` map giving obstruction heights in meters for the
//! eight principal compass directions. Directions missing from the map fall
//! back to a configured default height at evaluation time.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAXIMUM_BLOCKER_HEIGHT;
use crate::sunlight::EvaluationError;

/// One of the eight principal compass directions (45° octants).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// All octants in clockwise order starting from north.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Quantize a compass bearing to the nearest octant.
    ///
    /// `degrees` is measured clockwise from true north (0°/360° = N). Ties
    /// exactly between two octants resolve with `f64::round`, i.e. half away
    /// from zero: 22.5° maps to NE, 67.5° to E. Bearings at or past 360°
    /// wrap (360° maps back to N).
    pub fn from_bearing(degrees: f64) -> Direction {
        let index = ((degrees / 45.0).round() as i64).rem_euclid(8) as usize;
        Direction::ALL[index]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Obstruction heights in meters, keyed by compass octant.
///
/// The map may be partial or empty; absent octants use the configured
/// default height.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurroundingHeights(BTreeMap<Direction, f64>);

impl SurroundingHeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, direction: Direction, meters: f64) {
        self.0.insert(direction, meters);
    }

    pub fn get(&self, direction: Direction) -> Option<f64> {
        self.0.get(&direction).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, f64)> + '_ {
        self.0.iter().map(|(d, h)| (*d, *h))
    }
}

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Opening and closing hours, kept as plain numbers the way the source data
/// records them. Descriptive only; not used by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hours {
    pub opening_hours: f64,
    pub closing_hours: f64,
}

/// A point of interest with its location and obstruction survey.
///
/// Only `location` and `surrounding_heights` matter to the sunlight
/// computation; the remaining fields are passthrough document data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<Hours>,
    pub location: Location,
    #[serde(default, skip_serializing_if = "SurroundingHeights::is_empty")]
    pub surrounding_heights: SurroundingHeights,
}

impl Place {
    /// Check that the place carries usable evaluation inputs.
    ///
    /// Obstruction heights must be finite and non-negative: the shade
    /// formula only guarantees "night is never sunlit" when every required
    /// angle is non-negative, so bad survey data is rejected here instead of
    /// special-casing the sun's altitude sign downstream.
    pub fn validate(&self) -> Result<(), EvaluationError> {
        if self.id.is_empty() {
            return Err(EvaluationError::InvalidInput(
                "place has an empty id".into(),
            ));
        }
        if !self.location.is_valid() {
            return Err(EvaluationError::InvalidInput(format!(
                "place '{}' has invalid coordinates: lat={}, lng={}",
                self.id, self.location.lat, self.location.lng
            )));
        }
        for (direction, height) in self.surrounding_heights.iter() {
            if !height.is_finite() || height < 0.0 || height > MAXIMUM_BLOCKER_HEIGHT {
                return Err(EvaluationError::InvalidInput(format!(
                    "place '{}' has an invalid obstruction height for {}: {}",
                    self.id, direction, height
                )));
            }
        }
        Ok(())
    }
}
