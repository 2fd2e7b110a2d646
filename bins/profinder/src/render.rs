//! Printing command results as text or JSON.

use anyhow::Result;
use owo_colors::OwoColorize;
use profinder_cli::{format_count, OutputFormat, Status};
use profinder_search::{Category, Place, ProfessionalWithDistance};
use serde::Serialize;

/// Pretty-print any serializable value on stdout.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn place(format: OutputFormat, place: &Place) -> Result<()> {
    if format.is_json() {
        return json(place);
    }

    println!("{}", place.label.bold());
    println!("  {}", place.coordinate.dimmed());
    Ok(())
}

pub fn categories(format: OutputFormat, categories: &[Category]) -> Result<()> {
    if format.is_json() {
        return json(categories);
    }

    if categories.is_empty() {
        Status::info("No categories found");
        return Ok(());
    }

    Status::header(&format_count(categories.len(), "category", "categories"));
    for category in categories {
        let id = format!("{:<20}", category.id.as_str());
        match &category.description {
            Some(description) => println!("  {} {}  {}", id.cyan(), category.name, description.dimmed()),
            None => println!("  {} {}", id.cyan(), category.name),
        }
    }
    Ok(())
}

/// Search results, nearest first, as produced by the search.
pub fn professionals(format: OutputFormat, title: &str, results: &[ProfessionalWithDistance]) -> Result<()> {
    if format.is_json() {
        return json(results);
    }

    if results.is_empty() {
        Status::info("No professionals found");
        return Ok(());
    }

    Status::header(&format!(
        "{} {}",
        format_count(results.len(), "professional", "professionals"),
        title
    ));

    for hit in results {
        let record = &hit.professional;
        // Pad before coloring so escape codes don't count toward the width
        let distance = format!("{:>10}", hit.distance_label());
        let distance = if hit.distance.is_known() {
            distance.green().to_string()
        } else {
            distance.yellow().to_string()
        };

        println!("  {}  {}  {}", distance, record.display_name().bold(), record.rate_label().dimmed());
        println!("  {:>10}  {}", "", record.headline_or_default());
        println!("  {:>10}  {}", "", record.bio_or_default().dimmed());
        if let Some(category) = &record.category_id {
            println!("  {:>10}  {}", "", category.as_str().cyan());
        }
    }
    Ok(())
}
