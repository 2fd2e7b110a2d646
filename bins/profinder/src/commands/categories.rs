//! Category listing and browsing

use crate::context::Context;
use crate::render;
use anyhow::Result;
use profinder_cli::progress;
use profinder_geo::Coordinate;
use profinder_search::{CategoryId, RadiusSearch};

pub async fn run_list(ctx: &Context) -> Result<()> {
    let search = RadiusSearch::new(ctx.store()?);

    let pb = progress::spinner("Loading categories...");
    let categories = search.categories().await;
    progress::finish(&pb);

    render::categories(ctx.format, &categories?)
}

pub async fn run_browse(ctx: &Context, category: &str, origin: Option<(f64, f64)>) -> Result<()> {
    let origin = origin
        .map(|(lat, lng)| Coordinate::try_new(lat, lng))
        .transpose()?;
    let category = CategoryId::new(category);
    let search = RadiusSearch::new(ctx.store()?);

    let pb = progress::spinner("Loading professionals...");
    let results = search.professionals_by_category(&category, origin).await;
    progress::finish(&pb);

    render::professionals(ctx.format, &format!("in {category}"), &results?)
}
