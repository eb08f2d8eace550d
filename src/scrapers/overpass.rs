//! Neighborhood lookups against the Overpass API.
//!
//! One query per `(state, city)` pair selects every node tagged
//! `place=neighbourhood` inside the city's area. The interpreter returns the
//! full result set in a single response, so there is no paging.

use crate::models::{CityQuery, NeighborhoodRecord};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};
use url::Url;

/// Name used for nodes without a `name` tag.
pub const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

/// Build the Overpass QL query for one city.
pub fn build_query(state: &str, city: &str) -> String {
    format!(
        "[out:json];\n\
         area[name=\"{state}\"]->.state;\n\
         area[name=\"{city}\"](area.state)->.city;\n\
         node[\"place\"=\"neighbourhood\"](area.city);\n\
         out;\n"
    )
}

/// Project an Overpass JSON body into neighborhood records for `query`.
pub fn parse_elements(
    query: &CityQuery,
    body: &str,
) -> Result<Vec<NeighborhoodRecord>, serde_json::Error> {
    let response: OverpassResponse = serde_json::from_str(body)?;
    Ok(response
        .elements
        .into_iter()
        .map(|element| NeighborhoodRecord {
            state: query.state.clone(),
            city: query.city.clone(),
            name: element
                .tags
                .get("name")
                .cloned()
                .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            latitude: element.lat,
            longitude: element.lon,
        })
        .collect())
}

#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    endpoint: Url,
}

impl OverpassClient {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// Fetch the neighborhoods of one city.
    ///
    /// Non-200 responses, transport errors and undecodable bodies are logged
    /// and yield an empty list.
    #[instrument(level = "info", skip(self), fields(state = %query.state, city = %query.city))]
    pub async fn fetch_neighborhoods(&self, query: &CityQuery) -> Vec<NeighborhoodRecord> {
        let ql = build_query(&query.state, &query.city);
        let response = match self
            .client
            .get(self.endpoint.clone())
            .query(&[("data", ql.as_str())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Overpass request failed");
                return Vec::new();
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Failed to fetch neighborhoods");
            return Vec::new();
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Failed to read Overpass response body");
                return Vec::new();
            }
        };

        match parse_elements(query, &body) {
            Ok(records) => {
                debug!(count = records.len(), "Parsed neighborhoods");
                records
            }
            Err(e) => {
                warn!(error = %e, "Overpass returned undecodable JSON");
                Vec::new()
            }
        }
    }
}
