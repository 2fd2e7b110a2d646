//! Forward and reverse geocoding

use crate::context::Context;
use crate::render;
use anyhow::Result;
use profinder_cli::progress;
use profinder_geo::Coordinate;
use profinder_search::{resolve_address, Geocoder, Place};
use profinder_telemetry::{names, Timer};

pub async fn run_forward(ctx: &Context, address: &str) -> Result<()> {
    let geocoder = ctx.geocoder()?;

    let pb = progress::spinner("Resolving address...");
    let timer = Timer::start(names::GEOCODE_DURATION);
    let result = resolve_address(&geocoder, address).await;
    timer.stop();
    progress::finish(&pb);

    render::place(ctx.format, &result?)
}

pub async fn run_reverse(ctx: &Context, lat: f64, lng: f64) -> Result<()> {
    let coordinate = Coordinate::try_new(lat, lng)?;
    let geocoder = ctx.geocoder()?;

    let pb = progress::spinner("Looking up place name...");
    let timer = Timer::start(names::GEOCODE_DURATION);
    let label = geocoder.reverse(coordinate).await;
    timer.stop();
    progress::finish(&pb);

    let label = label
        .map_err(|e| anyhow::anyhow!("reverse geocoding failed: {e}"))?
        .unwrap_or_else(|| coordinate.to_string());

    render::place(ctx.format, &Place { coordinate, label })
}
