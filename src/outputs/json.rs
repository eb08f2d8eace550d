//! JSON output for the neighborhood pipeline.
//!
//! The file holds a single pretty-printed array of
//! `{"state", "city", "name", "lat", "lon"}` objects.

use crate::models::NeighborhoodRecord;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::error::Error;

/// Render neighborhoods as a JSON array indented by two spaces.
pub fn render_neighborhoods(records: &[NeighborhoodRecord]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

#[cfg(test)]
pub fn parse_neighborhoods(data: &[u8]) -> Result<Vec<NeighborhoodRecord>, serde_json::Error> {
    serde_json::from_slice(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::tabular;

    fn sample() -> Vec<NeighborhoodRecord> {
        vec![
            NeighborhoodRecord {
                state: "Illinois".to_string(),
                city: "Chicago".to_string(),
                name: "Wicker Park".to_string(),
                latitude: Some(41.9088),
                longitude: Some(-87.6796),
            },
            NeighborhoodRecord {
                state: "Illinois".to_string(),
                city: "Chicago".to_string(),
                name: "Unknown".to_string(),
                latitude: Some(41.85),
                longitude: None,
            },
        ]
    }

    #[test]
    fn test_json_is_indented_array() {
        let text = String::from_utf8(render_neighborhoods(&sample()).unwrap()).unwrap();
        assert!(text.starts_with("[\n  {\n    \"state\": \"Illinois\""));
        assert!(text.contains("\"lon\": null"));
    }

    #[test]
    fn test_json_and_csv_decode_to_same_records() {
        let records = sample();
        let from_json = parse_neighborhoods(&render_neighborhoods(&records).unwrap()).unwrap();
        let from_csv =
            tabular::parse_neighborhoods(&tabular::render_neighborhoods(&records).unwrap())
                .unwrap();
        assert_eq!(from_json, records);
        assert_eq!(from_csv, from_json);
    }

    #[test]
    fn test_empty_json_array() {
        let text = String::from_utf8(render_neighborhoods(&[]).unwrap()).unwrap();
        assert_eq!(text.trim(), "[]");
    }
}
