//! Create/edit form for a listing, as far as location is concerned.
//!
//! The form owns the authoritative [`ListingLocationFields`]. Each input
//! writes only its own slice: the region selector the three region parts, the
//! map picker the two coordinates, the text inputs one field each.

use estate_core::{
    Coordinate, Listing, ListingAttributes, ListingLocationFields, ListingPayload,
    LocationPickerSeed, RegionSelection,
};

use crate::error::LocationError;
use crate::map_picker::MapPicker;
use crate::notice::Notices;
use crate::provider::{Geocoder, ListingBackend, MapSdk};

#[derive(Debug, Clone)]
pub struct ListingForm {
    /// `None` when creating a new listing.
    listing_id: Option<i64>,
    pub attributes: ListingAttributes,
    location: ListingLocationFields,
    default_coordinate: Coordinate,
}

impl ListingForm {
    /// A blank form for a new listing.
    #[must_use]
    pub fn create(default_coordinate: Coordinate) -> Self {
        Self {
            listing_id: None,
            attributes: ListingAttributes::default(),
            location: ListingLocationFields::default(),
            default_coordinate,
        }
    }

    /// A form pre-filled from an existing listing.
    #[must_use]
    pub fn edit(listing: &Listing, default_coordinate: Coordinate) -> Self {
        Self {
            listing_id: Some(listing.id),
            attributes: listing.attributes.clone(),
            location: listing.location.clone(),
            default_coordinate,
        }
    }

    #[must_use]
    pub fn listing_id(&self) -> Option<i64> {
        self.listing_id
    }

    #[must_use]
    pub fn location(&self) -> &ListingLocationFields {
        &self.location
    }

    /// The value to show in the region selector.
    #[must_use]
    pub fn region(&self) -> Option<RegionSelection> {
        self.location.region()
    }

    pub fn set_latitude(&mut self, latitude: Option<f64>) {
        self.location.latitude = latitude;
    }

    pub fn set_longitude(&mut self, longitude: Option<f64>) {
        self.location.longitude = longitude;
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.location.address = address.into();
    }

    /// Region selector changed. Coordinates are left alone.
    pub fn apply_region(&mut self, selection: &RegionSelection) {
        self.location.province = Some(selection.province.clone());
        self.location.city = Some(selection.city.clone());
        self.location.district = Some(selection.district.clone());
    }

    /// Region selector cleared.
    pub fn clear_region(&mut self) {
        self.location.province = None;
        self.location.city = None;
        self.location.district = None;
    }

    /// Map picker confirmed. Region parts and address are left alone.
    pub fn apply_pick(&mut self, picked: Coordinate) {
        self.location.longitude = Some(picked.longitude);
        self.location.latitude = Some(picked.latitude);
    }

    /// What the map picker should open on, by priority: both coordinates,
    /// then all three region parts, then the default coordinate.
    #[must_use]
    pub fn map_seed(&self) -> LocationPickerSeed {
        if let Some(coordinate) = self.location.coordinate() {
            return LocationPickerSeed::Coordinate(coordinate);
        }
        if let Some(region) = self.location.region() {
            return LocationPickerSeed::Address(region);
        }
        LocationPickerSeed::Coordinate(self.default_coordinate)
    }

    /// Opens `picker` seeded from the current form state.
    pub fn open_map_picker<S: MapSdk, G: Geocoder>(&self, picker: &mut MapPicker<S, G>) {
        picker.show(self.map_seed());
    }

    /// Confirms `picker` and folds the result back in, if there was one.
    pub fn confirm_map_picker<S: MapSdk, G: Geocoder>(
        &mut self,
        picker: &mut MapPicker<S, G>,
    ) -> Option<Coordinate> {
        let picked = picker.confirm()?;
        self.apply_pick(picked);
        Some(picked)
    }

    /// The outgoing body: attributes plus location fields, verbatim.
    #[must_use]
    pub fn payload(&self) -> ListingPayload {
        ListingPayload {
            attributes: self.attributes.clone(),
            location: self.location.clone(),
        }
    }

    /// Creates or updates the listing in one request.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::Submit`] if the backend rejects the request;
    /// an error notice has already been raised.
    pub async fn submit<B>(&self, backend: &B, notices: &Notices) -> Result<Listing, LocationError>
    where
        B: ListingBackend + ?Sized,
    {
        let payload = self.payload();
        let result = match self.listing_id {
            Some(id) => backend.update_listing(id, &payload).await,
            None => backend.create_listing(&payload).await,
        };

        match result {
            Ok(listing) => {
                notices.info(if self.listing_id.is_some() {
                    "Listing updated."
                } else {
                    "Listing created."
                });
                Ok(listing)
            }
            Err(e) => {
                notices.error("Saving the listing failed.");
                Err(LocationError::Submit(e))
            }
        }
    }
}
