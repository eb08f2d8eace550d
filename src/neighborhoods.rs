//! Neighborhood fetch driver.
//!
//! Queries Overpass once per city, accumulates every record in memory and
//! writes the JSON and CSV outputs at the very end. Nothing is persisted
//! before all cities are done.

use crate::models::{CityQuery, NeighborhoodRecord};
use crate::outputs::{json, tabular};
use crate::scrapers::overpass::OverpassClient;
use crate::utils::replace_file;
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

/// Fetch neighborhoods for every city, in input order.
///
/// A failed city contributes no records and does not stop the others.
#[instrument(level = "info", skip_all, fields(cities = cities.len()))]
pub async fn collect_neighborhoods(
    client: &OverpassClient,
    cities: &[CityQuery],
) -> Vec<NeighborhoodRecord> {
    let total = cities.len();
    let mut all = Vec::new();
    for (i, query) in cities.iter().enumerate() {
        let records = client.fetch_neighborhoods(query).await;
        info!(
            progress = %format!("{}/{}", i + 1, total),
            state = %query.state,
            city = %query.city,
            count = records.len(),
            "Fetched neighborhoods"
        );
        all.extend(records);
    }
    all
}

/// Write the JSON file, then the CSV file.
#[instrument(level = "info", skip_all, fields(count = records.len()))]
pub async fn write_outputs(
    records: &[NeighborhoodRecord],
    json_path: &Path,
    csv_path: &Path,
) -> Result<(), Box<dyn Error>> {
    replace_file(json_path, &json::render_neighborhoods(records)?).await?;
    info!(path = %json_path.display(), "Wrote neighborhood JSON");
    replace_file(csv_path, &tabular::render_neighborhoods(records)?).await?;
    info!(path = %csv_path.display(), "Wrote neighborhood CSV");
    Ok(())
}
