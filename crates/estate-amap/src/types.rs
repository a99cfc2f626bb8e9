//! AMap web-service response types.
//!
//! Every response carries a `{"status": "1", "info": "OK", ...}` envelope; the
//! status is checked on the raw JSON before these types are deserialized, so
//! only the payload fields are modelled here.

use estate_core::RegionNode;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// v3/config/district
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DistrictResponse {
    #[serde(default)]
    pub districts: Vec<DistrictNode>,
}

/// One level of the district hierarchy.
///
/// The deepest requested level omits `districts` or sends an empty list; both
/// mean "leaf".
#[derive(Debug, Deserialize)]
pub struct DistrictNode {
    pub name: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub districts: Vec<DistrictNode>,
}

impl From<DistrictNode> for RegionNode {
    fn from(node: DistrictNode) -> Self {
        RegionNode::with_children(
            node.name,
            node.districts.into_iter().map(RegionNode::from).collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// v3/geocode/geo
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub geocodes: Vec<GeocodeCandidate>,
}

/// A single geocoding candidate.
///
/// AMap sends `[]` instead of `""` for unknown string fields, so `location`
/// is kept as raw JSON and parsed separately.
#[derive(Debug, Deserialize)]
pub struct GeocodeCandidate {
    #[serde(default)]
    pub location: serde_json::Value,
}
