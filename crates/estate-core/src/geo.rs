//! Coordinates and the seed handed to the map picker.

use serde::{Deserialize, Serialize};

use crate::region::RegionSelection;

/// A WGS-style longitude/latitude pair as reported by the mapping provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

/// Tiananmen Square. Used whenever no better starting point is known.
pub const DEFAULT_COORDINATE: Coordinate = Coordinate {
    longitude: 116.397_428,
    latitude: 39.909_23,
};

impl Coordinate {
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Whether both components fall inside the geographic ranges.
    ///
    /// Informational only: nothing in the location flow rejects an
    /// out-of-range coordinate.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        (-180.0..=180.0).contains(&self.longitude) && (-90.0..=90.0).contains(&self.latitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}

/// Initial view state for the map picker.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationPickerSeed {
    /// Start exactly here; no geocoding.
    Coordinate(Coordinate),
    /// Forward-geocode the concatenated region address first.
    Address(RegionSelection),
    /// Nothing known; start at the configured default.
    Default,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_coordinate_is_in_range() {
        assert!(DEFAULT_COORDINATE.is_in_range());
    }

    #[test]
    fn out_of_range_longitude_is_flagged() {
        assert!(!Coordinate::new(181.0, 10.0).is_in_range());
        assert!(!Coordinate::new(10.0, -90.5).is_in_range());
    }

    #[test]
    fn display_uses_provider_order() {
        assert_eq!(Coordinate::new(121.47, 31.23).to_string(), "121.47,31.23");
    }

    #[test]
    fn serializes_with_named_fields() {
        let json = serde_json::to_value(Coordinate::new(121.47, 31.23)).unwrap();
        assert_eq!(json["longitude"], 121.47);
        assert_eq!(json["latitude"], 31.23);
    }
}
