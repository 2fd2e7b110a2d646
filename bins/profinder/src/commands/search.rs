//! Radius search around an address, a coordinate or the current position

use crate::context::Context;
use crate::render;
use anyhow::{bail, Result};
use clap::Args;
use profinder_cli::{format_duration, progress, Status};
use profinder_geo::{format_distance, Coordinate};
use profinder_search::{
    locate_current, resolve_address, CategoryId, Place, RadiusSearch, SearchOutcome, SearchQuery, SearchSession,
};
use profinder_telemetry::{metrics, names, Timer};
use tracing::debug;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Address to search around
    #[arg(short, long, conflicts_with_all = ["lat", "here"])]
    pub address: Option<String>,

    /// Latitude of the search center
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the search center
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Search around the current position
    #[arg(long, conflicts_with = "lat")]
    pub here: bool,

    /// Search radius in kilometers [default: from config]
    #[arg(short, long)]
    pub radius: Option<f64>,

    /// Only show professionals of this category
    #[arg(long)]
    pub category: Option<String>,

    /// Drop results the store returned from outside the radius
    #[arg(long)]
    pub verify_radius: bool,

    /// Hide professionals without a recorded location
    #[arg(long)]
    pub exclude_unknown: bool,

    /// Show at most this many results
    #[arg(short, long)]
    pub limit: Option<usize>,
}

pub async fn run(ctx: &Context, args: SearchArgs) -> Result<()> {
    let radius_km = radius(ctx, args.radius);
    let center = resolve_center(ctx, &args).await?;

    let query = SearchQuery::new(center.coordinate, radius_km)?
        .with_category(args.category.as_deref().map(CategoryId::new));

    let search = RadiusSearch::new(ctx.store()?)
        .with_options(ctx.search_options(args.verify_radius, args.exclude_unknown));
    let session = SearchSession::new(search);

    let pb = progress::spinner(&format!("Searching within {}...", format_distance(radius_km)));
    let timer = Timer::start(names::SEARCH_DURATION);
    let outcome = session.run(query).await;
    let elapsed = timer.stop();
    progress::finish(&pb);

    metrics().increment(names::SEARCHES);
    let results = match outcome {
        SearchOutcome::Applied { results, .. } => results,
        SearchOutcome::Failed { error, .. } => {
            metrics().increment(names::SEARCH_FAILURES);
            return Err(error.into());
        }
        SearchOutcome::Stale { generation, latest } => {
            bail!("search {generation} was superseded by search {latest}")
        }
    };
    metrics().gauge(names::SEARCH_RESULTS, results.len() as u64);
    debug!(results = results.len(), elapsed = %format_duration(elapsed), "Search finished");

    let shown = match args.limit {
        Some(limit) => &results[..results.len().min(limit)],
        None => &results[..],
    };

    let title = format!("within {} of {}", format_distance(radius_km), center.label);
    render::professionals(ctx.format, &title, shown)?;

    if shown.len() < results.len() && !ctx.format.is_json() {
        Status::info(&format!("{} more not shown", results.len() - shown.len()));
    }
    Ok(())
}

/// Requested radius clamped into the configured bounds.
fn radius(ctx: &Context, requested: Option<f64>) -> f64 {
    let config = &ctx.config.schema.search;
    let Some(requested) = requested else {
        return config.default_radius_km;
    };

    // Non-positive and non-finite radii are rejected by the query itself
    if !(requested.is_finite() && requested > 0.0) {
        return requested;
    }

    let clamped = config.clamp_radius(requested);
    if clamped != requested {
        Status::warning(&format!(
            "Radius {requested} km is outside {}..={} km, using {clamped} km",
            config.min_radius_km, config.max_radius_km
        ));
    }
    clamped
}

async fn resolve_center(ctx: &Context, args: &SearchArgs) -> Result<Place> {
    if let Some(address) = &args.address {
        let geocoder = ctx.geocoder()?;
        let pb = progress::spinner("Resolving address...");
        let timer = Timer::start(names::GEOCODE_DURATION);
        let place = resolve_address(&geocoder, address).await;
        timer.stop();
        progress::finish(&pb);
        return Ok(place?);
    }

    if let Some((lat, lng)) = args.lat.zip(args.lng) {
        let coordinate = Coordinate::try_new(lat, lng)?;
        return Ok(Place {
            coordinate,
            label: coordinate.to_string(),
        });
    }

    if args.here {
        let provider = ctx.location_provider();
        let geocoder = ctx.geocoder()?;
        let pb = progress::spinner("Getting current location...");
        let timer = Timer::start(names::LOCATE_DURATION);
        let place = locate_current(provider.as_ref(), &geocoder, ctx.location_timeout()).await;
        timer.stop();
        progress::finish(&pb);
        return Ok(place?);
    }

    bail!("no search center: pass --address, --lat/--lng or --here")
}
