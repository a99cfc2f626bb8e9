//! Client for the AMap web-service REST API.
//!
//! Covers the two endpoints the listing editor needs: the administrative
//! district hierarchy (`v3/config/district`) and forward geocoding
//! (`v3/geocode/geo`).

pub mod client;
pub mod error;
pub mod types;

mod district;
mod geocode;

pub use client::AmapClient;
pub use error::AmapError;
pub use geocode::parse_location;
