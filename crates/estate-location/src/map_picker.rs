//! Map-based coordinate picker.
//!
//! Lifecycle: `Closed → Initializing → Ready → Confirmed`, and any state back
//! to `Closed` when the dialog is dismissed.
//!
//! Initialization is split in two so that the dialog stays responsive while
//! providers are slow:
//!
//! 1. [`MapPicker::after_open_change`] is the readiness gate. It only starts
//!    when the dialog has finished opening *and* the container has a real
//!    size, and hands back an [`InitTicket`].
//! 2. [`SeedResolver::resolve`] does the network work without borrowing the
//!    picker.
//! 3. [`MapPicker::finish`] applies the result, unless the dialog was closed
//!    or reopened in the meantime, in which case the result is dropped.
//!
//! [`MapPicker::initialize`] runs all three back to back.

use std::sync::Arc;

use estate_core::{Coordinate, LocationPickerSeed, DEFAULT_COORDINATE};

use crate::notice::Notices;
use crate::provider::{Geocoder, MapContainer, MapInstance, MapSdk};
use crate::seed::{ResolvedSeed, SeedResolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    Closed,
    Initializing,
    Ready,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickerOptions {
    pub default_coordinate: Coordinate,
    pub zoom: u8,
    /// City context for geocoding address seeds.
    pub geocode_city: String,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            default_coordinate: DEFAULT_COORDINATE,
            zoom: 11,
            geocode_city: "全国".to_string(),
        }
    }
}

/// Proof that an initialization was started for a particular open cycle.
#[derive(Debug, Clone)]
pub struct InitTicket {
    generation: u64,
    seed: LocationPickerSeed,
    container: MapContainer,
}

impl InitTicket {
    #[must_use]
    pub fn seed(&self) -> &LocationPickerSeed {
        &self.seed
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitOutcome {
    /// Map and marker exist; the marker sits at this coordinate.
    Ready(Coordinate),
    /// The SDK or map creation failed; the picker stays `Initializing`.
    SdkUnavailable,
    /// The dialog was closed or reopened while resolving; nothing was applied.
    Discarded,
    /// The readiness gate did not pass; nothing was started.
    NotStarted,
}

pub struct MapPicker<S: MapSdk, G: Geocoder> {
    sdk: Arc<S>,
    geocoder: Arc<G>,
    notices: Notices,
    options: PickerOptions,
    state: PickerState,
    visible: bool,
    seed: LocationPickerSeed,
    /// Bumped on every open and close so late results can be recognised.
    generation: u64,
    map: Option<S::Map>,
}

impl<S: MapSdk, G: Geocoder> MapPicker<S, G> {
    pub fn new(sdk: Arc<S>, geocoder: Arc<G>, notices: Notices, options: PickerOptions) -> Self {
        Self {
            sdk,
            geocoder,
            notices,
            options,
            state: PickerState::Closed,
            visible: false,
            seed: LocationPickerSeed::Default,
            generation: 0,
            map: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> PickerState {
        self.state
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn has_map(&self) -> bool {
        self.map.is_some()
    }

    #[must_use]
    pub fn marker_position(&self) -> Option<Coordinate> {
        self.map.as_ref().and_then(MapInstance::marker_position)
    }

    /// Makes the dialog visible with `seed`. Does not touch the map: that
    /// waits for [`after_open_change`](Self::after_open_change).
    pub fn show(&mut self, seed: LocationPickerSeed) {
        self.teardown();
        self.generation += 1;
        self.seed = seed;
        self.visible = true;
        self.state = PickerState::Closed;
        tracing::debug!(seed = ?self.seed, "map picker shown");
    }

    /// Dialog open/close transition finished.
    ///
    /// Returns a ticket only when the dialog is open and visible and the
    /// container has a non-zero size. Any existing map is released first.
    pub fn after_open_change(&mut self, open: bool, container: MapContainer) -> Option<InitTicket> {
        if !open || !self.visible {
            return None;
        }
        if !container.is_realized() {
            tracing::warn!(?container, "map container is not ready yet");
            return None;
        }

        self.teardown();
        self.generation += 1;
        self.state = PickerState::Initializing;
        Some(InitTicket {
            generation: self.generation,
            seed: self.seed.clone(),
            container,
        })
    }

    /// A detached handle for the asynchronous half of initialization.
    #[must_use]
    pub fn resolver(&self) -> SeedResolver<S, G> {
        SeedResolver {
            sdk: Arc::clone(&self.sdk),
            geocoder: Arc::clone(&self.geocoder),
            options: self.options.clone(),
        }
    }

    /// Applies a resolved seed for `ticket`.
    pub fn finish(&mut self, ticket: InitTicket, resolved: ResolvedSeed) -> InitOutcome {
        if ticket.generation != self.generation
            || !self.visible
            || self.state != PickerState::Initializing
        {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale map initialization"
            );
            return InitOutcome::Discarded;
        }

        let center = match resolved {
            ResolvedSeed::Loaded(center) => center,
            ResolvedSeed::SdkFailed(e) => {
                self.notices.error(format!("Map initialization failed: {e}"));
                return InitOutcome::SdkUnavailable;
            }
        };

        if center.fallback_reason.is_some() {
            self.notices.warning(
                "Could not locate the selected province/city/district; using the default position.",
            );
        }

        let mut map = match self
            .sdk
            .create_map(&ticket.container, center.coordinate, self.options.zoom)
        {
            Ok(map) => map,
            Err(e) => {
                self.notices.error(format!("Map initialization failed: {e}"));
                return InitOutcome::SdkUnavailable;
            }
        };
        map.place_marker(center.coordinate);
        self.map = Some(map);
        self.state = PickerState::Ready;
        tracing::debug!(center = %center.coordinate, "map picker ready");
        InitOutcome::Ready(center.coordinate)
    }

    /// Gate, resolve and finish in one call.
    pub async fn initialize(&mut self, container: MapContainer) -> InitOutcome {
        let Some(ticket) = self.after_open_change(true, container) else {
            return InitOutcome::NotStarted;
        };
        let resolved = self.resolver().resolve(&ticket).await;
        self.finish(ticket, resolved)
    }

    /// Click on the map: the marker jumps to `at`.
    pub fn click(&mut self, at: Coordinate) {
        self.move_marker(at);
    }

    /// Marker dragged to `to`.
    pub fn drag_marker(&mut self, to: Coordinate) {
        self.move_marker(to);
    }

    /// Emits the live marker position and closes the dialog.
    ///
    /// Without a marker (initialization never completed) this just closes.
    pub fn confirm(&mut self) -> Option<Coordinate> {
        let picked = if self.state == PickerState::Ready {
            self.marker_position()
        } else {
            None
        };

        self.teardown();
        self.generation += 1;
        self.visible = false;
        self.state = if picked.is_some() {
            PickerState::Confirmed
        } else {
            PickerState::Closed
        };

        match picked {
            Some(at) => tracing::debug!(%at, "map picker confirmed"),
            None => tracing::debug!("map picker confirmed without a marker"),
        }
        picked
    }

    /// Dismisses the dialog from any state and releases the map.
    pub fn close(&mut self) {
        self.teardown();
        self.generation += 1;
        self.visible = false;
        self.state = PickerState::Closed;
    }

    fn move_marker(&mut self, at: Coordinate) {
        if self.state != PickerState::Ready {
            return;
        }
        if let Some(map) = self.map.as_mut() {
            map.set_marker_position(at);
        }
    }

    fn teardown(&mut self) {
        if let Some(map) = self.map.take() {
            map.destroy();
            tracing::debug!("map instance destroyed");
        }
    }
}

impl<S: MapSdk, G: Geocoder> Drop for MapPicker<S, G> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "map_picker_test.rs"]
mod tests;
