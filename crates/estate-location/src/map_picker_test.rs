use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use estate_core::RegionSelection;

use super::*;
use crate::error::ProviderError;
use crate::headless::HeadlessSdk;
use crate::notice::NoticeLevel;

const CONTAINER: MapContainer = MapContainer::new(800, 600);

struct StubGeocoder {
    answer: Result<Vec<Coordinate>, ()>,
    calls: AtomicUsize,
    last_address: std::sync::Mutex<Option<String>>,
}

impl StubGeocoder {
    fn answering(answer: Vec<Coordinate>) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(answer),
            calls: AtomicUsize::new(0),
            last_address: std::sync::Mutex::new(None),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            answer: Err(()),
            calls: AtomicUsize::new(0),
            last_address: std::sync::Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn geocode(&self, address: &str, _city: &str) -> Result<Vec<Coordinate>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_address.lock().unwrap() = Some(address.to_string());
        self.answer
            .clone()
            .map_err(|()| ProviderError::EmptyOrMalformed("status 0".into()))
    }
}

fn sdk() -> HeadlessSdk {
    HeadlessSdk::new(Some("js-key".into()), Some("sec".into()))
}

fn picker(
    sdk: &HeadlessSdk,
    geocoder: &Arc<StubGeocoder>,
    notices: &Notices,
) -> MapPicker<HeadlessSdk, StubGeocoder> {
    MapPicker::new(
        Arc::new(sdk.clone()),
        Arc::clone(geocoder),
        notices.clone(),
        PickerOptions::default(),
    )
}

fn pudong() -> LocationPickerSeed {
    LocationPickerSeed::Address(RegionSelection::new("上海市", "上海市", "浦东新区"))
}

#[test]
fn show_does_not_initialize() {
    let sdk = sdk();
    let mut picker = picker(&sdk, &StubGeocoder::answering(vec![]), &Notices::new());
    picker.show(LocationPickerSeed::Default);
    assert!(picker.is_visible());
    assert_eq!(picker.state(), PickerState::Closed);
    assert!(!picker.has_map());
    assert_eq!(sdk.loads(), 0);
}

#[test]
fn gate_requires_open_visible_and_sized_container() {
    let mut picker = picker(&sdk(), &StubGeocoder::answering(vec![]), &Notices::new());

    assert!(picker.after_open_change(true, CONTAINER).is_none(), "not shown yet");

    picker.show(LocationPickerSeed::Default);
    assert!(picker.after_open_change(false, CONTAINER).is_none());
    assert!(picker
        .after_open_change(true, MapContainer::new(0, 0))
        .is_none());
    assert_eq!(picker.state(), PickerState::Closed);

    assert!(picker.after_open_change(true, CONTAINER).is_some());
    assert_eq!(picker.state(), PickerState::Initializing);
}

#[tokio::test]
async fn coordinate_seed_makes_no_geocoding_call() {
    let geocoder = StubGeocoder::answering(vec![Coordinate::new(0.0, 0.0)]);
    let mut picker = picker(&sdk(), &geocoder, &Notices::new());
    let seed = Coordinate::new(121.47, 31.23);

    picker.show(LocationPickerSeed::Coordinate(seed));
    let outcome = picker.initialize(CONTAINER).await;

    assert_eq!(outcome, InitOutcome::Ready(seed));
    assert_eq!(picker.state(), PickerState::Ready);
    assert_eq!(picker.marker_position(), Some(seed));
    assert_eq!(geocoder.calls(), 0);
}

#[tokio::test]
async fn address_seed_geocodes_once_and_centers_on_first_candidate() {
    let geocoder = StubGeocoder::answering(vec![
        Coordinate::new(121.544_379, 31.221_517),
        Coordinate::new(0.0, 0.0),
    ]);
    let notices = Notices::new();
    let mut picker = picker(&sdk(), &geocoder, &notices);

    picker.show(pudong());
    let outcome = picker.initialize(CONTAINER).await;

    assert_eq!(outcome, InitOutcome::Ready(Coordinate::new(121.544_379, 31.221_517)));
    assert_eq!(geocoder.calls(), 1);
    assert_eq!(
        geocoder.last_address.lock().unwrap().as_deref(),
        Some("上海市上海市浦东新区")
    );
    assert!(notices.snapshot().is_empty());
}

#[tokio::test]
async fn failed_geocode_falls_back_to_default_with_warning() {
    let geocoder = StubGeocoder::failing();
    let notices = Notices::new();
    let mut picker = picker(&sdk(), &geocoder, &notices);

    picker.show(pudong());
    let outcome = picker.initialize(CONTAINER).await;

    assert_eq!(outcome, InitOutcome::Ready(DEFAULT_COORDINATE));
    assert_eq!(picker.marker_position(), Some(DEFAULT_COORDINATE));
    assert_eq!(geocoder.calls(), 1);
    assert_eq!(notices.count(NoticeLevel::Warning), 1);
}

#[tokio::test]
async fn empty_geocode_falls_back_to_default() {
    let geocoder = StubGeocoder::answering(Vec::new());
    let notices = Notices::new();
    let mut picker = picker(&sdk(), &geocoder, &notices);

    picker.show(pudong());
    assert_eq!(
        picker.initialize(CONTAINER).await,
        InitOutcome::Ready(DEFAULT_COORDINATE)
    );
    assert_eq!(notices.count(NoticeLevel::Warning), 1);
}

#[tokio::test]
async fn sdk_failure_leaves_picker_initializing() {
    let geocoder = StubGeocoder::answering(vec![]);
    let notices = Notices::new();
    let sdk = HeadlessSdk::new(None, None);
    let mut picker = picker(&sdk, &geocoder, &notices);

    picker.show(LocationPickerSeed::Default);
    let outcome = picker.initialize(CONTAINER).await;

    assert_eq!(outcome, InitOutcome::SdkUnavailable);
    assert_eq!(picker.state(), PickerState::Initializing);
    assert!(!picker.has_map());
    assert_eq!(notices.count(NoticeLevel::Error), 1);
    assert_eq!(geocoder.calls(), 0);
}

#[tokio::test]
async fn click_and_drag_move_the_same_marker() {
    let mut picker = picker(&sdk(), &StubGeocoder::answering(vec![]), &Notices::new());
    picker.show(LocationPickerSeed::Default);
    picker.initialize(CONTAINER).await;

    picker.click(Coordinate::new(121.0, 31.0));
    assert_eq!(picker.marker_position(), Some(Coordinate::new(121.0, 31.0)));
    picker.drag_marker(Coordinate::new(121.5, 31.5));
    assert_eq!(picker.marker_position(), Some(Coordinate::new(121.5, 31.5)));
}

#[tokio::test]
async fn confirm_emits_live_marker_and_releases_map() {
    let sdk = sdk();
    let mut picker = picker(&sdk, &StubGeocoder::answering(vec![]), &Notices::new());
    picker.show(LocationPickerSeed::Default);
    picker.initialize(CONTAINER).await;
    picker.drag_marker(Coordinate::new(121.48, 31.24));

    let picked = picker.confirm();

    assert_eq!(picked, Some(Coordinate::new(121.48, 31.24)));
    assert_eq!(picker.state(), PickerState::Confirmed);
    assert!(!picker.is_visible());
    assert_eq!(sdk.live_instances(), 0);
}

#[tokio::test]
async fn confirm_without_marker_is_silent_noop_that_closes() {
    let notices = Notices::new();
    let mut picker = picker(&HeadlessSdk::new(None, None), &StubGeocoder::answering(vec![]), &notices);
    picker.show(LocationPickerSeed::Default);
    picker.initialize(CONTAINER).await;
    let before = notices.snapshot().len();

    assert_eq!(picker.confirm(), None);
    assert_eq!(picker.state(), PickerState::Closed);
    assert!(!picker.is_visible());
    assert_eq!(notices.snapshot().len(), before);
}

#[tokio::test]
async fn close_during_resolution_discards_late_result() {
    let sdk = sdk();
    let geocoder = StubGeocoder::answering(vec![Coordinate::new(121.5, 31.2)]);
    let mut picker = picker(&sdk, &geocoder, &Notices::new());

    picker.show(pudong());
    let ticket = picker.after_open_change(true, CONTAINER).expect("gate passes");
    let resolved = picker.resolver().resolve(&ticket).await;
    picker.close();

    assert_eq!(picker.finish(ticket, resolved), InitOutcome::Discarded);
    assert_eq!(picker.state(), PickerState::Closed);
    assert_eq!(sdk.created_instances(), 0);
}

#[tokio::test]
async fn reopen_during_resolution_discards_first_cycle() {
    let sdk = sdk();
    let mut picker = picker(&sdk, &StubGeocoder::answering(vec![]), &Notices::new());

    picker.show(LocationPickerSeed::Default);
    let stale = picker.after_open_change(true, CONTAINER).unwrap();
    let stale_resolved = picker.resolver().resolve(&stale).await;

    picker.show(LocationPickerSeed::Coordinate(Coordinate::new(1.0, 2.0)));
    let fresh = picker.after_open_change(true, CONTAINER).unwrap();
    let fresh_resolved = picker.resolver().resolve(&fresh).await;

    assert_eq!(picker.finish(stale, stale_resolved), InitOutcome::Discarded);
    assert_eq!(
        picker.finish(fresh, fresh_resolved),
        InitOutcome::Ready(Coordinate::new(1.0, 2.0))
    );
    assert_eq!(sdk.live_instances(), 1);
}

#[tokio::test]
async fn repeated_open_close_cycles_do_not_leak_instances() {
    let sdk = sdk();
    let mut picker = picker(&sdk, &StubGeocoder::answering(vec![]), &Notices::new());

    for _ in 0..3 {
        picker.show(LocationPickerSeed::Default);
        assert!(matches!(picker.initialize(CONTAINER).await, InitOutcome::Ready(_)));
        assert_eq!(sdk.live_instances(), 1);
        picker.close();
        assert_eq!(sdk.live_instances(), 0);
    }
    assert_eq!(sdk.created_instances(), 3);
}

#[tokio::test]
async fn reinitializing_an_open_picker_releases_previous_map() {
    let sdk = sdk();
    let mut picker = picker(&sdk, &StubGeocoder::answering(vec![]), &Notices::new());
    picker.show(LocationPickerSeed::Default);
    picker.initialize(CONTAINER).await;
    picker.initialize(CONTAINER).await;
    assert_eq!(sdk.created_instances(), 2);
    assert_eq!(sdk.live_instances(), 1);
}

#[tokio::test]
async fn dropping_picker_releases_map() {
    let sdk = sdk();
    {
        let mut picker = picker(&sdk, &StubGeocoder::answering(vec![]), &Notices::new());
        picker.show(LocationPickerSeed::Default);
        picker.initialize(CONTAINER).await;
        assert_eq!(sdk.live_instances(), 1);
    }
    assert_eq!(sdk.live_instances(), 0);
}
