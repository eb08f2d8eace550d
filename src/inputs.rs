//! Input file readers.
//!
//! Malformed input is fatal: a bad line or a missing column stops the run
//! before any network request is made.

use crate::models::{CityQuery, Location};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Parse `state,city` lines.
///
/// # Errors
///
/// Every line, blank ones included, must hold exactly one comma; the first
/// line that does not fails the whole parse with its 1-based line number.
pub fn parse_cities(text: &str) -> Result<Vec<CityQuery>, Box<dyn Error>> {
    let mut cities = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        let mut parts = line.split(',');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(state), Some(city), None) => cities.push(CityQuery {
                state: state.to_string(),
                city: city.to_string(),
            }),
            _ => {
                return Err(format!(
                    "line {}: expected `state,city`, got {line:?}",
                    index + 1
                )
                .into());
            }
        }
    }
    Ok(cities)
}

#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn read_cities(path: &Path) -> Result<Vec<CityQuery>, Box<dyn Error>> {
    let text = fs::read_to_string(path).await?;
    let cities = parse_cities(&text)?;
    info!(count = cities.len(), "Loaded cities");
    Ok(cities)
}

/// Parse the neighborhood CSV into search locations.
pub fn parse_locations(data: &[u8]) -> Result<Vec<Location>, csv::Error> {
    csv::Reader::from_reader(data).deserialize().collect()
}

#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn read_locations(path: &Path) -> Result<Vec<Location>, Box<dyn Error>> {
    let data = fs::read(path).await?;
    let locations = parse_locations(&data)?;
    info!(count = locations.len(), "Loaded locations");
    Ok(locations)
}
