//! # listing_harvest
//!
//! Two batch pipelines that feed each other through flat files:
//!
//! 1. **neighborhoods**: query the Overpass API for the neighborhoods of every
//!    `state,city` pair and write `us_neighborhoods.json` and
//!    `us_neighborhoods.csv`.
//! 2. **listings**: for every neighborhood, page through a business directory
//!    search, scrape each listing's contact details and checkpoint them to
//!    `call_centers_progress.csv`.
//!
//! ## Usage
//!
//! ```sh
//! listing_harvest neighborhoods --cities cities.txt
//! listing_harvest listings
//! ```
//!
//! Both pipelines are sequential: one request in flight at a time. Request
//! failures are logged and skipped; only bad input and failed writes end a
//! run early.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

mod cli;
mod config;
mod crawl;
mod inputs;
mod models;
mod neighborhoods;
mod outputs;
mod scrapers;
mod utils;

use cli::{Cli, Command};
use config::Settings;
use crawl::{Checkpoint, CrawlDriver, CsvSnapshot};
use scrapers::directory::DirectoryClient;
use scrapers::overpass::OverpassClient;
use utils::ensure_parent_writable;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("listing_harvest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let settings = Settings::load(args.config.as_deref()).await?;
    let client = scrapers::build_client(&settings.user_agent)?;

    let result = match args.command {
        Command::Neighborhoods {
            cities,
            json_output,
            csv_output,
        } => {
            async {
                ensure_parent_writable(&json_output).await?;
                ensure_parent_writable(&csv_output).await?;
                let cities = inputs::read_cities(&cities).await?;

                let overpass = OverpassClient::new(client, Url::parse(&settings.overpass_url)?);
                let records = neighborhoods::collect_neighborhoods(&overpass, &cities).await;
                neighborhoods::write_outputs(&records, &json_output, &csv_output).await?;
                info!(
                    count = records.len(),
                    json = %json_output.display(),
                    csv = %csv_output.display(),
                    "Fetched neighborhoods"
                );
                Ok::<(), Box<dyn Error>>(())
            }
            .await
        }
        Command::Listings {
            locations,
            output,
            search_terms,
        } => {
            async {
                ensure_parent_writable(&output).await?;
                let locations = inputs::read_locations(&locations).await?;

                let directory = DirectoryClient::new(client, Url::parse(&settings.search_url)?);
                let checkpoint = Checkpoint::new(settings.batch_size, CsvSnapshot::new(&output));
                let driver =
                    CrawlDriver::new(directory, checkpoint, search_terms, settings.page_delay());
                let (summary, _) = driver.run(&locations).await?;
                info!(
                    locations = summary.locations,
                    pages = summary.pages,
                    listings_seen = summary.listings_seen,
                    rows = summary.records,
                    path = %output.display(),
                    "Data saved"
                );
                Ok::<(), Box<dyn Error>>(())
            }
            .await
        }
    };

    let elapsed = start_time.elapsed();
    if let Err(e) = &result {
        error!(error = %e, ?elapsed, "Run failed");
    } else {
        info!(
            ?elapsed,
            secs = elapsed.as_secs(),
            millis = elapsed.subsec_millis(),
            "Execution complete"
        );
    }
    result
}
