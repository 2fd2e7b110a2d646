//! Newest professionals in the directory

use crate::context::Context;
use crate::render;
use anyhow::Result;
use profinder_cli::progress;
use profinder_geo::Coordinate;
use profinder_search::RadiusSearch;

pub async fn run(ctx: &Context, limit: usize, origin: Option<(f64, f64)>) -> Result<()> {
    let origin = origin
        .map(|(lat, lng)| Coordinate::try_new(lat, lng))
        .transpose()?;
    let search = RadiusSearch::new(ctx.store()?);

    let pb = progress::spinner("Loading recent professionals...");
    let results = search.recent(limit, origin).await;
    progress::finish(&pb);

    render::professionals(ctx.format, "newest first", &results?)
}
