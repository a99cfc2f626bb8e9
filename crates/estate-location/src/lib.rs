//! Location selection for the listing editor.
//!
//! Three pieces cooperate through plain values:
//!
//! * [`RegionSelector`] loads the province → city → district hierarchy once per
//!   mount and emits a [`RegionSelection`](estate_core::RegionSelection).
//! * [`MapPicker`] owns a map instance and a draggable marker and emits a
//!   [`Coordinate`](estate_core::Coordinate) on confirm.
//! * [`ListingForm`] owns the authoritative location fields, seeds the picker,
//!   and folds both emissions back into its own state.
//!
//! External services sit behind the traits in [`provider`] so they can be
//! swapped for deterministic doubles.

pub mod error;
pub mod headless;
pub mod listing_form;
pub mod map_picker;
pub mod notice;
pub mod provider;
pub mod region_selector;
pub mod seed;

pub use error::{LocationError, ProviderError};
pub use headless::{HeadlessMap, HeadlessSdk};
pub use listing_form::ListingForm;
pub use map_picker::{InitOutcome, InitTicket, MapPicker, PickerOptions, PickerState};
pub use notice::{Notice, NoticeLevel, Notices};
pub use provider::{Geocoder, ListingBackend, MapContainer, MapInstance, MapSdk, RegionProvider};
pub use region_selector::{CascaderOption, RegionSelector, SelectorView};
pub use seed::{resolve_center, ResolvedCenter, ResolvedSeed, SeedResolver};
