use std::sync::Arc;

use estate_core::{AppConfig, Coordinate, ListingLocationFields, LocationPickerSeed};
use estate_location::{
    resolve_center, Geocoder, InitOutcome, ListingForm, MapContainer, MapPicker, MapSdk,
    Notices, PickerOptions, ResolvedCenter,
};

use crate::{amap_client, headless_sdk, picker_options, LocationArgs};

/// Container size handed to the headless map. Only non-zero matters.
const HEADLESS_CONTAINER: MapContainer = MapContainer::new(1024, 768);

/// Forward-geocode `address` and print every candidate.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the geocoding request
/// fails.
pub(crate) async fn run_geocode(
    config: &AppConfig,
    address: &str,
    city: Option<&str>,
) -> anyhow::Result<()> {
    let client = amap_client(config)?;
    let city = city.unwrap_or(&config.geocode_city);
    let candidates = client.geocode(address, city).await?;

    if candidates.is_empty() {
        println!(
            "no candidates for {address}; the map would open on {}",
            config.default_coordinate
        );
        return Ok(());
    }
    for (index, candidate) in candidates.iter().enumerate() {
        println!("{index}: {candidate}");
    }
    Ok(())
}

/// What a `locate` run found out.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Located {
    /// No pick requested: where the picker would open.
    Preview(ResolvedCenter),
    /// The picker opened at `opened_at`; `picked` is what confirm emitted.
    Picked {
        opened_at: Coordinate,
        picked: Option<Coordinate>,
    },
    /// The map could not be brought up; the form is unchanged.
    MapUnavailable,
}

/// Print the seed and initial marker position for a set of location fields.
/// With `--pick`, drive the map picker instead and print the confirmed fields.
///
/// # Errors
///
/// Returns an error if the geocoding client cannot be built.
pub(crate) async fn run_locate(
    config: &AppConfig,
    notices: &Notices,
    args: &LocationArgs,
) -> anyhow::Result<()> {
    let mut form = ListingForm::create(config.default_coordinate);
    if let Some(selection) = args.region() {
        form.apply_region(&selection);
    }
    apply_coordinates(&mut form, args);
    println!("seed: {}", describe_seed(&form.map_seed()));

    let located = locate(
        headless_sdk(config),
        amap_client(config)?,
        notices,
        picker_options(config),
        &mut form,
        args.pick,
    )
    .await;

    match located {
        Located::Preview(center) => match &center.fallback_reason {
            Some(reason) => println!("center: {} (fallback: {reason})", center.coordinate),
            None => println!("center: {}", center.coordinate),
        },
        Located::Picked { opened_at, picked } => {
            println!("center: {opened_at}");
            if picked.is_some() {
                print_location(form.location());
            }
        }
        Located::MapUnavailable => println!("map unavailable"),
    }
    Ok(())
}

/// Resolves where the picker opens for `form`, or, given `pick`, runs the
/// picker itself. The seed is resolved once either way.
pub(crate) async fn locate<S, G>(
    sdk: Arc<S>,
    geocoder: Arc<G>,
    notices: &Notices,
    options: PickerOptions,
    form: &mut ListingForm,
    pick: Option<Coordinate>,
) -> Located
where
    S: MapSdk,
    G: Geocoder,
{
    let Some(pick) = pick else {
        return Located::Preview(resolve_center(&*geocoder, &form.map_seed(), &options).await);
    };
    let picker = MapPicker::new(sdk, geocoder, notices.clone(), options);
    pick_with(picker, form, pick).await
}

/// Copy whichever coordinates were given on the command line into `form`.
pub(crate) fn apply_coordinates(form: &mut ListingForm, args: &LocationArgs) {
    if args.longitude.is_some() {
        form.set_longitude(args.longitude);
    }
    if args.latitude.is_some() {
        form.set_latitude(args.latitude);
    }
}

/// Opens the map picker from `form`, clicks `pick`, and confirms back into
/// the form. Returns `None` when the map could not be brought up.
///
/// # Errors
///
/// Returns an error if the geocoding client cannot be built.
pub(crate) async fn pick_on_map(
    config: &AppConfig,
    notices: &Notices,
    form: &mut ListingForm,
    pick: Coordinate,
) -> anyhow::Result<Option<Coordinate>> {
    let picker = MapPicker::new(
        headless_sdk(config),
        amap_client(config)?,
        notices.clone(),
        picker_options(config),
    );
    Ok(match pick_with(picker, form, pick).await {
        Located::Picked { picked, .. } => picked,
        Located::Preview(_) | Located::MapUnavailable => None,
    })
}

async fn pick_with<S, G>(
    mut picker: MapPicker<S, G>,
    form: &mut ListingForm,
    pick: Coordinate,
) -> Located
where
    S: MapSdk,
    G: Geocoder,
{
    form.open_map_picker(&mut picker);
    let opened_at = match picker.initialize(HEADLESS_CONTAINER).await {
        InitOutcome::Ready(at) => at,
        outcome => {
            tracing::warn!(?outcome, "map picker did not become ready");
            picker.close();
            return Located::MapUnavailable;
        }
    };
    tracing::debug!(%opened_at, %pick, "map ready, moving marker");

    picker.click(pick);
    Located::Picked {
        opened_at,
        picked: form.confirm_map_picker(&mut picker),
    }
}

pub(crate) fn describe_seed(seed: &LocationPickerSeed) -> String {
    match seed {
        LocationPickerSeed::Coordinate(c) => format!("coordinate {c}"),
        LocationPickerSeed::Address(region) => format!("address {}", region.address()),
        LocationPickerSeed::Default => "default".to_string(),
    }
}

pub(crate) fn print_location(location: &ListingLocationFields) {
    let part = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    let number = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |n| n.to_string());
    println!("province:  {}", part(&location.province));
    println!("city:      {}", part(&location.city));
    println!("district:  {}", part(&location.district));
    println!("address:   {}", location.address);
    println!("longitude: {}", number(location.longitude));
    println!("latitude:  {}", number(location.latitude));
}
