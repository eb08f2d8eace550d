//! Command-line interface definitions.
//!
//! Both pipelines run as subcommands of one binary. Every flag has a default
//! matching the fixed file names the pipelines exchange, so a bare
//! `listing_harvest neighborhoods` followed by `listing_harvest listings`
//! runs the whole collection end to end.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for listing_harvest.
///
/// # Examples
///
/// ```sh
/// # Fetch neighborhoods for every `state,city` line in cities.txt
/// listing_harvest neighborhoods --cities cities.txt
///
/// # Scrape listings for every neighborhood, with tuned settings
/// listing_harvest --config settings.yaml listings --search-terms "call center"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a settings YAML file
    #[arg(short, long, global = true, env = "LISTING_HARVEST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Query Overpass for the neighborhoods of each city and write JSON and CSV
    Neighborhoods {
        /// Line-delimited `state,city` input file
        #[arg(long, default_value = "cities.txt")]
        cities: PathBuf,

        /// JSON output file
        #[arg(long, default_value = "us_neighborhoods.json")]
        json_output: PathBuf,

        /// CSV output file
        #[arg(long, default_value = "us_neighborhoods.csv")]
        csv_output: PathBuf,
    },

    /// Scrape directory listings for each neighborhood, checkpointing to CSV
    Listings {
        /// Neighborhood CSV with `name`, `city` and `state` columns
        #[arg(long, default_value = "us_neighborhoods.csv")]
        locations: PathBuf,

        /// CSV file rewritten at every checkpoint
        #[arg(short, long, default_value = "call_centers_progress.csv")]
        output: PathBuf,

        /// Free-text search term sent with every query
        #[arg(long, env = "SEARCH_TERMS", default_value = "call center")]
        search_terms: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighborhoods_defaults() {
        let cli = Cli::parse_from(["listing_harvest", "neighborhoods"]);
        assert!(cli.config.is_none());
        match cli.command {
            Command::Neighborhoods {
                cities,
                json_output,
                csv_output,
            } => {
                assert_eq!(cities, PathBuf::from("cities.txt"));
                assert_eq!(json_output, PathBuf::from("us_neighborhoods.json"));
                assert_eq!(csv_output, PathBuf::from("us_neighborhoods.csv"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_listings_flags() {
        let cli = Cli::parse_from([
            "listing_harvest",
            "listings",
            "--locations",
            "/tmp/n.csv",
            "-o",
            "/tmp/out.csv",
            "--search-terms",
            "plumber",
            "--config",
            "/tmp/settings.yaml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/settings.yaml")));
        match cli.command {
            Command::Listings {
                locations,
                output,
                search_terms,
            } => {
                assert_eq!(locations, PathBuf::from("/tmp/n.csv"));
                assert_eq!(output, PathBuf::from("/tmp/out.csv"));
                assert_eq!(search_terms, "plumber");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
