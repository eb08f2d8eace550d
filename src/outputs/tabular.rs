//! CSV rendering for both pipelines.
//!
//! Rendering produces bytes in memory; callers decide how those bytes reach
//! disk (see [`crate::utils::replace_file`]).

use crate::models::{ListingRecord, NeighborhoodRecord};
use std::error::Error;

/// Columns every listing CSV carries.
pub const LISTING_COLUMNS: [&str; 6] = [
    "Company Name",
    "C-level Name",
    "Phone Number",
    "Email",
    "Address",
    "Website URL",
];
pub const LINKEDIN_COLUMN: &str = "LinkedIn Profile";
pub const FACEBOOK_COLUMN: &str = "Facebook URL";

pub const NEIGHBORHOOD_COLUMNS: [&str; 5] = ["state", "city", "name", "lat", "lon"];

/// Render listing records as CSV.
///
/// The six base columns are always written. `LinkedIn Profile` and
/// `Facebook URL` are appended only when at least one record has that link,
/// always LinkedIn first regardless of which platform appeared first.
/// Missing values become empty cells.
pub fn render_listings(records: &[ListingRecord]) -> Result<Vec<u8>, Box<dyn Error>> {
    let with_linkedin = records.iter().any(|r| r.linkedin_url.is_some());
    let with_facebook = records.iter().any(|r| r.facebook_url.is_some());

    let mut header: Vec<&str> = LISTING_COLUMNS.to_vec();
    if with_linkedin {
        header.push(LINKEDIN_COLUMN);
    }
    if with_facebook {
        header.push(FACEBOOK_COLUMN);
    }

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(&header)?;
    for record in records {
        let mut row: Vec<&str> = [
            &record.company_name,
            &record.c_level_name,
            &record.phone,
            &record.email,
            &record.address,
            &record.website_url,
        ]
        .into_iter()
        .map(|field| field.as_deref().unwrap_or(""))
        .collect();
        if with_linkedin {
            row.push(record.linkedin_url.as_deref().unwrap_or(""));
        }
        if with_facebook {
            row.push(record.facebook_url.as_deref().unwrap_or(""));
        }
        wtr.write_record(&row)?;
    }
    Ok(wtr.into_inner().map_err(|e| e.into_error())?)
}

/// Render neighborhood records as CSV with a fixed header.
pub fn render_neighborhoods(records: &[NeighborhoodRecord]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(NEIGHBORHOOD_COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    Ok(wtr.into_inner().map_err(|e| e.into_error())?)
}

/// Parse neighborhood CSV produced by [`render_neighborhoods`].
#[cfg(test)]
pub fn parse_neighborhoods(data: &[u8]) -> Result<Vec<NeighborhoodRecord>, csv::Error> {
    csv::Reader::from_reader(data).deserialize().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(name: &str) -> ListingRecord {
        ListingRecord {
            company_name: Some(name.to_string()),
            phone: Some("555-0100".to_string()),
            ..ListingRecord::default()
        }
    }

    #[test]
    fn test_listing_header_without_social_columns() {
        let bytes = render_listings(&[listing("Acme")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Company Name,C-level Name,Phone Number,Email,Address,Website URL")
        );
        assert_eq!(lines.next(), Some("Acme,,555-0100,,,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_listing_social_columns_appear_once_seen() {
        let mut with_fb = listing("Beta, Inc.");
        with_fb.facebook_url = Some("https://facebook.com/beta".to_string());
        let bytes = render_listings(&[listing("Acme"), with_fb]).unwrap();

        let mut rdr = csv::Reader::from_reader(bytes.as_slice());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.len(), 7);
        assert_eq!(&headers[6], FACEBOOK_COLUMN);

        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][6], "");
        assert_eq!(&rows[1][0], "Beta, Inc.");
        assert_eq!(&rows[1][6], "https://facebook.com/beta");
    }

    #[test]
    fn test_listing_both_social_columns_in_fixed_order() {
        let mut record = listing("Acme");
        record.facebook_url = Some("fb".to_string());
        record.linkedin_url = Some("li".to_string());
        let bytes = render_listings(&[record]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Company Name,C-level Name,Phone Number,Email,Address,Website URL,LinkedIn Profile,Facebook URL"
        );
        assert!(lines[1].ends_with(",li,fb"));
    }

    #[test]
    fn test_empty_listings_write_header_only() {
        let bytes = render_listings(&[]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_neighborhood_csv_round_trip() {
        let records = vec![
            NeighborhoodRecord {
                state: "Texas".to_string(),
                city: "Austin".to_string(),
                name: "Hyde Park".to_string(),
                latitude: Some(30.3123),
                longitude: Some(-97.7281),
            },
            NeighborhoodRecord {
                state: "Texas".to_string(),
                city: "Austin".to_string(),
                name: "Unknown".to_string(),
                latitude: None,
                longitude: None,
            },
        ];
        let bytes = render_neighborhoods(&records).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert_eq!(text.lines().next(), Some("state,city,name,lat,lon"));
        assert_eq!(parse_neighborhoods(&bytes).unwrap(), records);
    }
}
