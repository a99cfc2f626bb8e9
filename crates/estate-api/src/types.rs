//! Backend response envelopes.

use estate_core::Listing;
use serde::Deserialize;

/// One page of `GET /houses`, Spring Data style.
#[derive(Debug, Deserialize)]
pub struct ListingPage {
    #[serde(default)]
    pub content: Vec<Listing>,
    pub page: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_elements: u64,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}
