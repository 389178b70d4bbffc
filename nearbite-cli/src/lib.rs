//! Command-line interface for the nearbite catalog tools.
//!
//! Two subcommands: `add` drives the catalog editor (place lookup,
//! de-duplication, append), `list` runs a one-shot browsing session over
//! the catalog file with the same filters the core exposes.

#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use geo::Coord;
use thiserror::Error;

use nearbite_catalog::{
    AppendOutcome, CatalogFileError, GooglePlaces, JsonCatalog, PlaceLookup, PlaceLookupError,
};
use nearbite_core::{
    CatalogError, CatalogSource, DEFAULT_PICK_COUNT, DayTime, FilterConfig, NearbyRestaurant,
    PositionError, PriceTier, PriceTierError, Session,
};

const DEFAULT_CATALOG_PATH: &str = "services/data.json";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] for bad arguments, lookup failures or catalog file
/// problems.
pub async fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Add(args) => run_add(args).await,
        Command::List(args) => run_list(&args),
    }
}

/// Errors surfaced to the terminal with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid command-line arguments.
    #[error(transparent)]
    ArgumentParsing(clap::Error),
    /// The place directory rejected or failed the lookup.
    #[error(transparent)]
    Lookup(#[from] PlaceLookupError),
    /// The catalog file could not be read or written.
    #[error(transparent)]
    CatalogFile(#[from] CatalogFileError),
    /// The catalog could not be loaded for a listing session.
    #[error(transparent)]
    Catalog(CatalogError),
    /// `--price` was outside the three known brackets.
    #[error(transparent)]
    InvalidPrice(#[from] PriceTierError),
    /// Only one half of a coordinate pair was supplied.
    #[error("--lat and --lon must be given together")]
    PartialPosition,
}

#[derive(Debug, Parser)]
#[command(
    name = "nearbite",
    about = "Browse and edit the nearbite restaurant catalog",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up a place and append it to the catalog file.
    Add(AddArgs),
    /// Filter the catalog the way the app does and print the matches.
    List(Box<ListArgs>),
}

/// Arguments for the `add` subcommand.
#[derive(Debug, Clone, Parser)]
struct AddArgs {
    /// Place name or Google Maps URL to resolve.
    query: String,
    /// Cuisine label to file the place under.
    #[arg(long)]
    cuisine: String,
    /// Google Maps API key.
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    api_key: String,
    /// Catalog file to append to.
    #[arg(long, value_name = "path", default_value = DEFAULT_CATALOG_PATH)]
    catalog: Utf8PathBuf,
}

/// Arguments for the `list` subcommand.
#[derive(Debug, Clone, Parser)]
struct ListArgs {
    /// Catalog file to read.
    #[arg(long, value_name = "path", default_value = DEFAULT_CATALOG_PATH)]
    catalog: Utf8PathBuf,
    /// Free-text query over name and cuisine.
    #[arg(long)]
    query: Option<String>,
    /// Price bracket, 1 (budget) to 3 (upscale).
    #[arg(long)]
    price: Option<u8>,
    /// Minimum rating.
    #[arg(long)]
    min_rating: Option<f32>,
    /// Distance cap in kilometres; needs --lat/--lon.
    #[arg(long)]
    max_distance: Option<f64>,
    /// Keep only places open right now.
    #[arg(long)]
    open_now: bool,
    /// Latitude of the current position.
    #[arg(long)]
    lat: Option<f64>,
    /// Longitude of the current position.
    #[arg(long)]
    lon: Option<f64>,
    /// Print random picks instead of the full list; the count defaults
    /// to three when the flag carries no value.
    #[arg(long, value_name = "count")]
    pick: Option<Option<usize>>,
}

async fn run_add(args: AddArgs) -> Result<(), CliError> {
    let lookup = GooglePlaces::new(args.api_key);
    run_add_with(&lookup, &args.query, &args.cuisine, &args.catalog).await
}

async fn run_add_with(
    lookup: &impl PlaceLookup,
    query: &str,
    cuisine: &str,
    path: &Utf8Path,
) -> Result<(), CliError> {
    let details = lookup.lookup(query).await?;
    match JsonCatalog::new(path.to_path_buf()).append(&details, cuisine)? {
        AppendOutcome::Added(added) => {
            println!("Added \"{}\" ({}) as id {}", added.name, added.cuisine, added.id);
        }
        AppendOutcome::Duplicate { name } => {
            println!("\"{name}\" is already in the catalog; nothing added");
        }
    }
    Ok(())
}

fn run_list(args: &ListArgs) -> Result<(), CliError> {
    let now = DayTime::from_datetime(&chrono::Local::now());
    let mut session = Session::with_filters(filters_from(args)?);

    session.resolve_catalog(JsonCatalog::new(args.catalog.clone()).load(), now);
    if let Some(error) = session.catalog_error() {
        return Err(CliError::Catalog(error.clone()));
    }
    session.resolve_position(position_from(args)?, now);

    if let Some(count) = pick_count(args) {
        let picks = session.pick(&mut rand::thread_rng(), count);
        print_records(picks, args.lat.is_some());
        return Ok(());
    }

    if session.matches().is_empty() {
        println!("No restaurants matched.");
    } else {
        print_records(session.matches(), args.lat.is_some());
    }
    Ok(())
}

fn filters_from(args: &ListArgs) -> Result<FilterConfig, CliError> {
    let defaults = FilterConfig::default();
    Ok(FilterConfig {
        query: args.query.clone().unwrap_or_default(),
        price: args.price.map(PriceTier::try_from).transpose()?,
        min_rating: args.min_rating,
        max_distance_km: args.max_distance.unwrap_or(defaults.max_distance_km),
        open_now: args.open_now,
    })
}

fn pick_count(args: &ListArgs) -> Option<usize> {
    args.pick.map(|count| count.unwrap_or(DEFAULT_PICK_COUNT))
}

fn position_from(args: &ListArgs) -> Result<Result<Coord<f64>, PositionError>, CliError> {
    match (args.lat, args.lon) {
        (Some(y), Some(x)) => Ok(Ok(Coord { x, y })),
        (None, None) => Ok(Err(PositionError::Unavailable)),
        _ => Err(CliError::PartialPosition),
    }
}

fn print_records(records: &[NearbyRestaurant], with_distance: bool) {
    for record in records {
        let r = &record.restaurant;
        let price = "$".repeat(u8::from(r.price).into());
        if with_distance {
            println!(
                "{:>3}  {}  [{}]  {}  {:.1}★  {:.1} km",
                r.id, r.name, r.cuisine, price, r.rating, record.distance_km
            );
        } else {
            println!("{:>3}  {}  [{}]  {}  {:.1}★", r.id, r.name, r.cuisine, price, r.rating);
        }
    }
}
