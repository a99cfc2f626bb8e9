mod listing;
mod locate;
mod regions;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use estate_amap::AmapClient;
use estate_core::{AppConfig, Coordinate, RegionSelection};
use estate_location::{HeadlessSdk, NoticeLevel, Notices, PickerOptions};
use tracing_subscriber::EnvFilter;

use crate::listing::ListingCommands;

#[derive(Debug, Parser)]
#[command(name = "estate-cli")]
#[command(about = "Listing location tools: regions, geocoding, map picking")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the province/city/district hierarchy
    Regions {
        /// List cities of this province
        #[arg(long)]
        province: Option<String>,
        /// List districts of this city (requires --province)
        #[arg(long, requires = "province")]
        city: Option<String>,
        /// Validate a full province/city/district path (requires --city)
        #[arg(long, requires = "city")]
        district: Option<String>,
    },
    /// Forward-geocode a free-form address
    Geocode {
        address: String,
        /// City context; defaults to ESTATE_GEOCODE_CITY
        #[arg(long)]
        city: Option<String>,
    },
    /// Show where the map picker opens for the given fields, then confirm
    Locate(LocateArgs),
    /// Read or relocate listings on the backend
    Listing {
        /// Bearer token for the listing backend
        #[arg(long, env = "ESTATE_API_TOKEN", hide_env_values = true)]
        token: Option<String>,
        #[command(subcommand)]
        command: ListingCommands,
    },
}

/// Location fields as typed into the form.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct LocationArgs {
    #[arg(long)]
    pub province: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub district: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,
    /// Click the map here ("lng,lat") before confirming
    #[arg(long, value_parser = parse_coordinate)]
    pub pick: Option<Coordinate>,
}

impl LocationArgs {
    pub(crate) fn region(&self) -> Option<RegionSelection> {
        RegionSelection::from_parts(
            self.province.as_deref(),
            self.city.as_deref(),
            self.district.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct LocateArgs {
    #[command(flatten)]
    pub location: LocationArgs,
}

fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    estate_amap::parse_location(raw).map_err(|e| e.to_string())
}

pub(crate) fn amap_client(config: &AppConfig) -> anyhow::Result<Arc<AmapClient>> {
    Ok(Arc::new(AmapClient::with_base_url(
        &config.amap_web_key,
        config.provider_timeout_secs,
        &config.amap_base_url,
    )?))
}

pub(crate) fn headless_sdk(config: &AppConfig) -> Arc<HeadlessSdk> {
    Arc::new(HeadlessSdk::new(
        config.amap_js_key.clone(),
        config.amap_security_code.clone(),
    ))
}

pub(crate) fn picker_options(config: &AppConfig) -> PickerOptions {
    PickerOptions {
        default_coordinate: config.default_coordinate,
        zoom: config.map_zoom,
        geocode_city: config.geocode_city.clone(),
    }
}

fn print_notices(notices: &Notices) {
    for notice in notices.drain() {
        let tag = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{tag}] {}", notice.message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("estate-cli ready; see --help");
        return Ok(());
    };

    let config = estate_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let notices = Notices::new();
    let result = match command {
        Commands::Regions {
            province,
            city,
            district,
        } => {
            regions::run_regions(
                &config,
                &notices,
                province.as_deref(),
                city.as_deref(),
                district.as_deref(),
            )
            .await
        }
        Commands::Geocode { address, city } => {
            locate::run_geocode(&config, &address, city.as_deref()).await
        }
        Commands::Locate(args) => locate::run_locate(&config, &notices, &args.location).await,
        Commands::Listing { token, command } => {
            listing::run_listing(&config, &notices, token, command).await
        }
    };

    print_notices(&notices);
    result
}
