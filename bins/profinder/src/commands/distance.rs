//! Offline distance helpers: no network involved.

use crate::context::Context;
use crate::render;
use anyhow::Result;
use owo_colors::OwoColorize;
use profinder_core::{Error, ErrorCode};
use profinder_geo::{distance_km, format_distance, Coordinate};
use serde_json::json;

pub fn run_distance(ctx: &Context, lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Result<()> {
    let from = Coordinate::try_new(lat1, lng1)?;
    let to = Coordinate::try_new(lat2, lng2)?;

    let km = distance_km(&from, &to);
    let label = format_distance(km);

    if ctx.format.is_json() {
        return render::json(&json!({
            "from": from,
            "to": to,
            "distance_km": km,
            "label": label,
        }));
    }

    println!("{}", label.bold());
    println!("  {} {}", "from".dimmed(), from);
    println!("  {} {}", "to".dimmed(), to);
    Ok(())
}

pub fn run_format(ctx: &Context, km: f64) -> Result<()> {
    if !(km.is_finite() && km >= 0.0) {
        return Err(Error::new(ErrorCode::InvalidRadius, format!("{km} is not a distance"))
            .with_suggestion("Pass a non-negative number of kilometers")
            .into());
    }

    let label = format_distance(km);
    if ctx.format.is_json() {
        return render::json(&json!({ "km": km, "label": label }));
    }

    println!("{label}");
    Ok(())
}
