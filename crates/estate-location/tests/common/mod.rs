//! Deterministic doubles for the external capabilities.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use estate_api::ApiError;
use estate_core::{Coordinate, Listing, ListingPayload, RegionNode};
use estate_location::{Geocoder, ListingBackend, ProviderError, RegionProvider};

pub struct StubRegions {
    pub fail: bool,
}

#[async_trait]
impl RegionProvider for StubRegions {
    async fn fetch_hierarchy(&self) -> Result<Vec<RegionNode>, ProviderError> {
        if self.fail {
            return Err(ProviderError::Unreachable("connection refused".into()));
        }
        Ok(vec![RegionNode::with_children(
            "上海市",
            vec![RegionNode::with_children(
                "上海市",
                vec![RegionNode::leaf("浦东新区"), RegionNode::leaf("黄浦区")],
            )],
        )])
    }
}

pub struct StubGeocoder {
    pub answer: Option<Coordinate>,
    pub calls: AtomicUsize,
    pub addresses: Mutex<Vec<String>>,
}

impl StubGeocoder {
    pub fn new(answer: Option<Coordinate>) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
            addresses: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn geocode(&self, address: &str, _city: &str) -> Result<Vec<Coordinate>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.addresses.lock().unwrap().push(address.to_string());
        match self.answer {
            Some(c) => Ok(vec![c]),
            None => Err(ProviderError::EmptyOrMalformed("status 0".into())),
        }
    }
}

#[derive(Default)]
pub struct RecordingBackend {
    pub created: Mutex<Vec<ListingPayload>>,
    pub updated: Mutex<Vec<(i64, ListingPayload)>>,
}

#[async_trait]
impl ListingBackend for RecordingBackend {
    async fn create_listing(&self, payload: &ListingPayload) -> Result<Listing, ApiError> {
        self.created.lock().unwrap().push(payload.clone());
        Ok(Listing {
            id: 100,
            attributes: payload.attributes.clone(),
            location: payload.location.clone(),
        })
    }

    async fn update_listing(&self, id: i64, payload: &ListingPayload) -> Result<Listing, ApiError> {
        self.updated.lock().unwrap().push((id, payload.clone()));
        Ok(Listing {
            id,
            attributes: payload.attributes.clone(),
            location: payload.location.clone(),
        })
    }
}

pub struct RejectingBackend;

#[async_trait]
impl ListingBackend for RejectingBackend {
    async fn create_listing(&self, _payload: &ListingPayload) -> Result<Listing, ApiError> {
        Err(ApiError::Unauthorized)
    }

    async fn update_listing(&self, _id: i64, _payload: &ListingPayload) -> Result<Listing, ApiError> {
        Err(ApiError::Unauthorized)
    }
}
