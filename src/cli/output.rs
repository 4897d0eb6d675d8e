//! Rendering of search results and progress feedback.

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use photon_client::error::Result;
use photon_client::models::Feature;
use std::time::Duration;

/// Prints features to stdout, as pretty JSON or as a table.
pub fn print_features(features: &[Feature], as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(features)?);
        return Ok(());
    }

    if features.is_empty() {
        println!("{}", "No results found.".yellow());
        return Ok(());
    }

    println!("{}", format!("{} result(s)", features.len()).cyan().bold());
    println!("{}", render_table(features));
    Ok(())
}

/// Builds a table with one row per feature.
pub fn render_table(features: &[Feature]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["#", "Name", "Type", "City", "Country", "Lat", "Lon"]);

    for (i, feature) in features.iter().enumerate() {
        let p = &feature.properties;
        let name = p.name.clone().unwrap_or_else(|| feature.label());
        table.add_row(vec![
            (i + 1).to_string(),
            name,
            p.kind.clone().unwrap_or_default(),
            p.city.clone().unwrap_or_default(),
            p.country.clone().unwrap_or_default(),
            format_coordinate(feature.latitude()),
            format_coordinate(feature.longitude()),
        ]);
    }

    table
}

fn format_coordinate(value: Option<f64>) -> String {
    value.map(|v| format!("{:.5}", v)).unwrap_or_else(|| "-".to_string())
}

/// A spinner on stderr, cleared by the caller once the request finishes.
pub fn spinner(message: &str) -> Result<ProgressBar> {
    let progress = ProgressBar::new_spinner();
    progress.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
    progress.set_message(message.to_string());
    progress.enable_steady_tick(Duration::from_millis(100));
    Ok(progress)
}
