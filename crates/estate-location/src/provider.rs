//! Capabilities consumed from outside: region data, geocoding, the mapping
//! SDK, and the listing backend.
//!
//! Production implementations for the AMap client and the listing client live
//! at the bottom of this file.

use async_trait::async_trait;
use estate_amap::AmapClient;
use estate_api::{ApiError, ListingClient};
use estate_core::{Coordinate, Listing, ListingPayload, RegionNode};

use crate::error::ProviderError;

/// Source of the province → city → district hierarchy.
#[async_trait]
pub trait RegionProvider: Send + Sync {
    /// Returns the province list with nested cities and districts.
    async fn fetch_hierarchy(&self) -> Result<Vec<RegionNode>, ProviderError>;
}

/// Forward geocoding: free-form address to candidate coordinates, best first.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str, city: &str) -> Result<Vec<Coordinate>, ProviderError>;
}

/// The rendering surface a map binds to. Only its size matters here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapContainer {
    pub width: u32,
    pub height: u32,
}

impl MapContainer {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A container is usable once laid out with a non-zero size.
    #[must_use]
    pub const fn is_realized(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Mapping SDK: loads asynchronously, then hands out map instances.
#[async_trait]
pub trait MapSdk: Send + Sync {
    type Map: MapInstance;

    /// Loads the SDK. Called once per picker initialization.
    async fn load_map(&self) -> Result<(), ProviderError>;

    /// Binds a new map to `container`, centered on `center`.
    fn create_map(
        &self,
        container: &MapContainer,
        center: Coordinate,
        zoom: u8,
    ) -> Result<Self::Map, ProviderError>;
}

/// A live map bound to a container. Must be [`destroy`](MapInstance::destroy)ed.
pub trait MapInstance: Send {
    /// Places the single draggable marker.
    fn place_marker(&mut self, at: Coordinate);

    /// Moves the marker. No-op when no marker has been placed.
    fn set_marker_position(&mut self, at: Coordinate);

    fn marker_position(&self) -> Option<Coordinate>;

    /// Releases the instance and its container binding.
    fn destroy(self);
}

/// Where a finished listing form is sent.
#[async_trait]
pub trait ListingBackend: Send + Sync {
    async fn create_listing(&self, payload: &ListingPayload) -> Result<Listing, ApiError>;

    async fn update_listing(&self, id: i64, payload: &ListingPayload) -> Result<Listing, ApiError>;
}

#[async_trait]
impl RegionProvider for AmapClient {
    async fn fetch_hierarchy(&self) -> Result<Vec<RegionNode>, ProviderError> {
        Ok(self.fetch_district_tree().await?)
    }
}

#[async_trait]
impl Geocoder for AmapClient {
    async fn geocode(&self, address: &str, city: &str) -> Result<Vec<Coordinate>, ProviderError> {
        Ok(AmapClient::geocode(self, address, city).await?)
    }
}

#[async_trait]
impl ListingBackend for ListingClient {
    async fn create_listing(&self, payload: &ListingPayload) -> Result<Listing, ApiError> {
        self.create(payload).await
    }

    async fn update_listing(&self, id: i64, payload: &ListingPayload) -> Result<Listing, ApiError> {
        self.update(id, payload).await
    }
}
