use clap::Subcommand;
use estate_api::{ListingClient, Session};
use estate_core::AppConfig;
use estate_location::{ListingForm, Notices, RegionSelector};

use crate::locate::{apply_coordinates, pick_on_map, print_location};
use crate::{amap_client, LocationArgs};

#[derive(Debug, Subcommand)]
pub(crate) enum ListingCommands {
    /// Print one listing's attributes and location
    Show { id: i64 },
    /// Change an existing listing's location and save it
    Relocate {
        id: i64,
        #[command(flatten)]
        location: LocationArgs,
        /// Replace the street address
        #[arg(long)]
        address: Option<String>,
    },
}

pub(crate) async fn run_listing(
    config: &AppConfig,
    notices: &Notices,
    token: Option<String>,
    command: ListingCommands,
) -> anyhow::Result<()> {
    let session = token.map_or_else(Session::anonymous, Session::with_token);
    let client = ListingClient::new(&config.api_url, config.api_timeout_secs, session)?;

    match command {
        ListingCommands::Show { id } => run_listing_show(&client, id).await,
        ListingCommands::Relocate {
            id,
            location,
            address,
        } => run_listing_relocate(config, notices, &client, id, &location, address).await,
    }
}

/// # Errors
///
/// Returns an error if the listing cannot be fetched.
pub(crate) async fn run_listing_show(client: &ListingClient, id: i64) -> anyhow::Result<()> {
    let listing = client.get(id).await?;
    let attributes = &listing.attributes;
    println!("#{} {}", listing.id, attributes.title);
    println!("price:     {}", attributes.price);
    println!("area:      {}", attributes.area);
    println!("layout:    {}", attributes.layout);
    println!("status:    {:?}", attributes.status);
    print_location(&listing.location);
    Ok(())
}

/// Fetch the listing into an edit form, apply the requested location
/// changes the way the form's inputs would, and submit.
///
/// A region is checked against the provider hierarchy before it is applied.
/// `--pick` goes through the map picker seeded from the form as it stands
/// after the other changes.
///
/// # Errors
///
/// Returns an error if the listing cannot be fetched, the region is not in
/// the hierarchy, or the backend rejects the update.
pub(crate) async fn run_listing_relocate(
    config: &AppConfig,
    notices: &Notices,
    client: &ListingClient,
    id: i64,
    location: &LocationArgs,
    address: Option<String>,
) -> anyhow::Result<()> {
    let listing = client.get(id).await?;
    let mut form = ListingForm::edit(&listing, config.default_coordinate);

    if let Some(requested) = location.region() {
        let amap = amap_client(config)?;
        let mut selector = RegionSelector::mount(&*amap, notices).await;
        selector.set_value(form.region());
        let [province, city, district] = requested.as_array();
        let selection = selector.select(province, city, district)?;
        form.apply_region(&selection);
    }
    if let Some(address) = address {
        form.set_address(address);
    }
    apply_coordinates(&mut form, location);

    if let Some(pick) = location.pick {
        if pick_on_map(config, notices, &mut form, pick).await?.is_none() {
            anyhow::bail!("map picker unavailable; listing {id} left unchanged");
        }
    }

    let saved = form.submit(client, notices).await?;
    print_location(&saved.location);
    Ok(())
}
