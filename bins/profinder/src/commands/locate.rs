//! Current position

use crate::context::Context;
use crate::render;
use anyhow::Result;
use profinder_cli::progress;
use profinder_search::locate_current;
use profinder_telemetry::{names, Timer};

pub async fn run(ctx: &Context) -> Result<()> {
    let provider = ctx.location_provider();
    let geocoder = ctx.geocoder()?;

    let pb = progress::spinner("Getting current location...");
    let timer = Timer::start(names::LOCATE_DURATION);
    let place = locate_current(provider.as_ref(), &geocoder, ctx.location_timeout()).await;
    timer.stop();
    progress::finish(&pb);

    render::place(ctx.format, &place?)
}
