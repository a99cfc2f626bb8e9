//! REST client for the listing backend.
//!
//! Only the `/houses` resource is modelled; the rest of the backend is out of
//! reach of the location editor.

pub mod client;
pub mod error;
pub mod session;
pub mod types;

pub use client::ListingClient;
pub use error::ApiError;
pub use session::Session;
pub use types::ListingPage;
