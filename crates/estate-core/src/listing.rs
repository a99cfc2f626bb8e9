//! Listing records as exchanged with the backend.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::Coordinate;
use crate::region::RegionSelection;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Available,
    Reserved,
    Sold,
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingStatus::Available => write!(f, "available"),
            ListingStatus::Reserved => write!(f, "reserved"),
            ListingStatus::Sold => write!(f, "sold"),
        }
    }
}

/// Descriptive attributes of a listing, everything except id and location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingAttributes {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Sent and received as a JSON number.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Floor area in square metres.
    #[serde(default)]
    pub area: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub layout: String,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// The location slice of a listing, owned by the edit form while editing.
///
/// Region parts and coordinates are independent: nothing derives one from the
/// other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingLocationFields {
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl ListingLocationFields {
    /// The region triple, when all three parts are filled in.
    #[must_use]
    pub fn region(&self) -> Option<RegionSelection> {
        RegionSelection::from_parts(
            self.province.as_deref(),
            self.city.as_deref(),
            self.district.as_deref(),
        )
    }

    /// The coordinate, when both parts are filled in.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.longitude, self.latitude) {
            (Some(longitude), Some(latitude)) => Some(Coordinate::new(longitude, latitude)),
            _ => None,
        }
    }
}

/// A listing as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    #[serde(flatten)]
    pub attributes: ListingAttributes,
    #[serde(flatten)]
    pub location: ListingLocationFields,
}

/// Body of a create or update request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingPayload {
    #[serde(flatten)]
    pub attributes: ListingAttributes,
    #[serde(flatten)]
    pub location: ListingLocationFields,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
