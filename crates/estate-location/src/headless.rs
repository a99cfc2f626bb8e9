//! In-memory mapping SDK for hosts without a rendering surface.
//!
//! Keeps the same contract as a real SDK (credential check on load, explicit
//! teardown) so the picker flow can be driven from the command line and from
//! tests. Counts live instances so leaks across open/close cycles show up.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use estate_core::Coordinate;

use crate::error::ProviderError;
use crate::provider::{MapContainer, MapInstance, MapSdk};

#[derive(Debug, Default)]
struct Counters {
    loads: AtomicUsize,
    live: AtomicUsize,
    created: AtomicUsize,
}

#[derive(Debug, Clone)]
pub struct HeadlessSdk {
    credential: Option<String>,
    security_code: Option<String>,
    counters: Arc<Counters>,
}

impl HeadlessSdk {
    /// Loading fails unless both the credential and the security code are set.
    #[must_use]
    pub fn new(credential: Option<String>, security_code: Option<String>) -> Self {
        Self {
            credential,
            security_code,
            counters: Arc::default(),
        }
    }

    #[must_use]
    pub fn loads(&self) -> usize {
        self.counters.loads.load(Ordering::SeqCst)
    }

    /// Map instances created and not yet destroyed.
    #[must_use]
    pub fn live_instances(&self) -> usize {
        self.counters.live.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn created_instances(&self) -> usize {
        self.counters.created.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MapSdk for HeadlessSdk {
    type Map = HeadlessMap;

    async fn load_map(&self) -> Result<(), ProviderError> {
        self.counters.loads.fetch_add(1, Ordering::SeqCst);
        let configured = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        if !configured(&self.credential) || !configured(&self.security_code) {
            return Err(ProviderError::Unreachable(
                "mapping SDK credential or security code is not configured".to_string(),
            ));
        }
        Ok(())
    }

    fn create_map(
        &self,
        container: &MapContainer,
        center: Coordinate,
        zoom: u8,
    ) -> Result<HeadlessMap, ProviderError> {
        if !container.is_realized() {
            return Err(ProviderError::Unreachable(
                "map container has no size".to_string(),
            ));
        }
        self.counters.created.fetch_add(1, Ordering::SeqCst);
        self.counters.live.fetch_add(1, Ordering::SeqCst);
        Ok(HeadlessMap {
            center,
            zoom,
            marker: None,
            counters: Arc::clone(&self.counters),
        })
    }
}

#[derive(Debug)]
pub struct HeadlessMap {
    center: Coordinate,
    zoom: u8,
    marker: Option<Coordinate>,
    counters: Arc<Counters>,
}

impl HeadlessMap {
    #[must_use]
    pub fn center(&self) -> Coordinate {
        self.center
    }

    #[must_use]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }
}

impl MapInstance for HeadlessMap {
    fn place_marker(&mut self, at: Coordinate) {
        self.marker = Some(at);
    }

    fn set_marker_position(&mut self, at: Coordinate) {
        if self.marker.is_some() {
            self.marker = Some(at);
        }
    }

    fn marker_position(&self) -> Option<Coordinate> {
        self.marker
    }

    fn destroy(self) {
        self.counters.live.fetch_sub(1, Ordering::SeqCst);
    }
}
