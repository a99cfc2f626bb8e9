use estate_core::AppConfig;
use estate_location::{Notices, RegionSelector};

use crate::amap_client;

/// Load the hierarchy once and print one level of it.
///
/// Without filters the provinces are listed; `--province` lists that
/// province's cities and `--city` that city's districts. Giving all three
/// validates the full path instead.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the full path given is
/// not in the hierarchy. A failed fetch is not an error here: it is reported
/// as a notice and an empty listing.
pub(crate) async fn run_regions(
    config: &AppConfig,
    notices: &Notices,
    province: Option<&str>,
    city: Option<&str>,
    district: Option<&str>,
) -> anyhow::Result<()> {
    let client = amap_client(config)?;
    let mut selector = RegionSelector::mount(&*client, notices).await;

    if let (Some(p), Some(c), Some(d)) = (province, city, district) {
        let selection = selector.select(p, c, d)?;
        println!("{}", selection.as_array().join(" / "));
        return Ok(());
    }

    let path: Vec<&str> = province.into_iter().chain(city).collect();
    let options = selector.options_at(&path);
    for option in options {
        if option.children.is_empty() {
            println!("{}", option.label);
        } else {
            println!("{} ({})", option.label, option.children.len());
        }
    }

    let shape = selector.shape();
    tracing::info!(
        provinces = shape.provinces,
        cities = shape.cities,
        districts = shape.districts,
        listed = options.len(),
        "region hierarchy loaded"
    );
    Ok(())
}
