//! Turning a [`LocationPickerSeed`] into the coordinate the map opens on.

use std::sync::Arc;

use estate_core::{Coordinate, LocationPickerSeed};

use crate::error::ProviderError;
use crate::map_picker::{InitTicket, PickerOptions};
use crate::provider::{Geocoder, MapSdk};

/// Where the map will open, and whether that is a fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCenter {
    pub coordinate: Coordinate,
    /// Set when an address seed could not be geocoded and the default was used.
    pub fallback_reason: Option<String>,
}

/// Result of the asynchronous half of picker initialization.
#[derive(Debug)]
pub enum ResolvedSeed {
    /// SDK loaded; the map can be created at this center.
    Loaded(ResolvedCenter),
    /// The SDK itself failed to load.
    SdkFailed(ProviderError),
}

/// Resolves a seed to a center.
///
/// Coordinate and default seeds never touch the network. An address seed
/// issues exactly one geocoding call and takes the first candidate; any
/// failure or an empty candidate list falls back to the default coordinate.
pub async fn resolve_center<G>(
    geocoder: &G,
    seed: &LocationPickerSeed,
    options: &PickerOptions,
) -> ResolvedCenter
where
    G: Geocoder + ?Sized,
{
    match seed {
        LocationPickerSeed::Coordinate(coordinate) => ResolvedCenter {
            coordinate: *coordinate,
            fallback_reason: None,
        },
        LocationPickerSeed::Default => ResolvedCenter {
            coordinate: options.default_coordinate,
            fallback_reason: None,
        },
        LocationPickerSeed::Address(region) => {
            let address = region.address();
            let reason = match geocoder.geocode(&address, &options.geocode_city).await {
                Ok(candidates) => match candidates.first() {
                    Some(first) => {
                        tracing::debug!(%address, center = %first, "geocoded picker seed");
                        return ResolvedCenter {
                            coordinate: *first,
                            fallback_reason: None,
                        };
                    }
                    None => format!("no geocoding result for {address}"),
                },
                Err(e) => e.to_string(),
            };
            tracing::warn!(%address, %reason, "falling back to default map position");
            ResolvedCenter {
                coordinate: options.default_coordinate,
                fallback_reason: Some(reason),
            }
        }
    }
}

/// The asynchronous half of picker initialization, detached from the picker
/// so the dialog can be closed while it is in flight.
pub struct SeedResolver<S, G> {
    pub(crate) sdk: Arc<S>,
    pub(crate) geocoder: Arc<G>,
    pub(crate) options: PickerOptions,
}

impl<S, G> SeedResolver<S, G>
where
    S: MapSdk,
    G: Geocoder,
{
    /// Loads the SDK, then resolves the ticket's seed.
    pub async fn resolve(&self, ticket: &InitTicket) -> ResolvedSeed {
        if let Err(e) = self.sdk.load_map().await {
            return ResolvedSeed::SdkFailed(e);
        }
        ResolvedSeed::Loaded(resolve_center(&*self.geocoder, ticket.seed(), &self.options).await)
    }
}

impl<S, G> Clone for SeedResolver<S, G> {
    fn clone(&self) -> Self {
        Self {
            sdk: Arc::clone(&self.sdk),
            geocoder: Arc::clone(&self.geocoder),
            options: self.options.clone(),
        }
    }
}
