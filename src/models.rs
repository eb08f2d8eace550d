//! Data models shared by both pipelines.
//!
//! - [`CityQuery`]: one `state,city` line of the cities input file
//! - [`NeighborhoodRecord`]: one geographic node returned by Overpass
//! - [`Location`]: one row of the neighborhood CSV, used as a search location
//! - [`ListingRecord`]: the contact fields scraped from one listing page
//!
//! Neighborhood records serialize with the short `lat`/`lon` keys used in
//! both the JSON and CSV outputs, so either file can be read back into the
//! same type.

use serde::{Deserialize, Serialize};

/// A `(state, city)` pair to query neighborhoods for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery {
    pub state: String,
    pub city: String,
}

/// A neighborhood node as projected from the Overpass response.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NeighborhoodRecord {
    pub state: String,
    pub city: String,
    /// The `name` tag of the node, or `"Unknown"` when untagged.
    pub name: String,
    #[serde(rename = "lat")]
    pub latitude: Option<f64>,
    #[serde(rename = "lon")]
    pub longitude: Option<f64>,
}

/// A search location read back from the neighborhood CSV.
///
/// Only the three identifying columns are required; `lat` and `lon` are
/// ignored when present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Location {
    pub name: String,
    pub city: String,
    pub state: String,
}

impl Location {
    /// The free-text geo term sent to the directory search.
    pub fn query(&self) -> String {
        format!("{}, {}, {}", self.name, self.city, self.state)
    }
}

/// Contact details scraped from one listing page.
///
/// `c_level_name` and `email` are never present on the listing pages and are
/// kept only so the output keeps its fixed column set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRecord {
    pub company_name: Option<String>,
    pub c_level_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub website_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub facebook_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_query_format() {
        let loc = Location {
            name: "Midtown".to_string(),
            city: "Atlanta".to_string(),
            state: "Georgia".to_string(),
        };
        assert_eq!(loc.query(), "Midtown, Atlanta, Georgia");
    }

    #[test]
    fn test_neighborhood_serializes_short_coordinate_keys() {
        let record = NeighborhoodRecord {
            state: "Texas".to_string(),
            city: "Austin".to_string(),
            name: "Hyde Park".to_string(),
            latitude: Some(30.3),
            longitude: Some(-97.7),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["lat"], 30.3);
        assert_eq!(value["lon"], -97.7);
        assert!(value.get("latitude").is_none());
    }

    #[test]
    fn test_neighborhood_missing_coordinates_are_null() {
        let record = NeighborhoodRecord {
            state: "Texas".to_string(),
            city: "Austin".to_string(),
            name: "Unknown".to_string(),
            latitude: None,
            longitude: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""lat":null"#));
        assert!(json.contains(r#""lon":null"#));
    }

    #[test]
    fn test_listing_record_defaults_empty() {
        let record = ListingRecord::default();
        assert!(record.company_name.is_none());
        assert!(record.c_level_name.is_none());
        assert!(record.email.is_none());
    }
}
