//! Listing crawl driver with batch checkpointing.
//!
//! For every location the driver walks search pages from 1 upward, scrapes
//! each listing a page links to, and stops at the first empty page:
//!
//! ```text
//! page = 1
//! loop:
//!     urls = fetch_page(page)
//!     if urls is empty: next location
//!     for url in urls: scrape_listing(url) -> checkpoint.push
//!     page += 1
//!     sleep(page_delay)
//! checkpoint.finish()
//! ```
//!
//! # Checkpointing
//!
//! Records accumulate in a [`Checkpoint`]. Every `batch_size` records the
//! whole accumulator is handed to a [`FlushStrategy`], and once more after
//! the last location. With [`CsvSnapshot`] each flush rewrites the output
//! file from scratch, so a killed run keeps everything up to the last
//! completed batch.

use crate::models::{ListingRecord, Location};
use crate::outputs::tabular;
use crate::scrapers::directory::DirectoryClient;
use crate::utils::replace_file;
use std::error::Error;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument};

/// Source of search pages and listing records.
///
/// Both operations are infallible from the driver's point of view: a failed
/// page is an empty page and a failed listing is `None`.
pub trait ListingSource {
    /// URLs linked from one page of search results, in page order.
    async fn fetch_page(&self, search_terms: &str, location: &str, page: u32) -> Vec<String>;

    /// Contact fields of one listing, or `None` when it could not be fetched.
    async fn scrape_listing(&self, url: &str) -> Option<ListingRecord>;
}

impl ListingSource for DirectoryClient {
    async fn fetch_page(&self, search_terms: &str, location: &str, page: u32) -> Vec<String> {
        DirectoryClient::fetch_page(self, search_terms, location, page).await
    }

    async fn scrape_listing(&self, url: &str) -> Option<ListingRecord> {
        DirectoryClient::scrape_listing(self, url).await
    }
}

/// Persists the accumulated records.
pub trait FlushStrategy {
    /// Called with every record accumulated so far, oldest first.
    async fn flush(&mut self, records: &[ListingRecord]) -> Result<(), Box<dyn Error>>;
}

/// Rewrites a CSV file with the full accumulator on every flush.
#[derive(Debug, Clone)]
pub struct CsvSnapshot {
    path: PathBuf,
}

impl CsvSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FlushStrategy for CsvSnapshot {
    async fn flush(&mut self, records: &[ListingRecord]) -> Result<(), Box<dyn Error>> {
        let bytes = tabular::render_listings(records)?;
        replace_file(&self.path, &bytes).await
    }
}

/// Accumulated records plus the policy for persisting them.
#[derive(Debug)]
pub struct Checkpoint<F> {
    records: Vec<ListingRecord>,
    batch_size: NonZeroUsize,
    sink: F,
}

impl<F: FlushStrategy> Checkpoint<F> {
    pub fn new(batch_size: NonZeroUsize, sink: F) -> Self {
        Self {
            records: Vec::new(),
            batch_size,
            sink,
        }
    }

    /// Append a record, flushing everything when a batch boundary is reached.
    /// Returns whether a flush happened.
    pub async fn push(&mut self, record: ListingRecord) -> Result<bool, Box<dyn Error>> {
        self.records.push(record);
        if self.records.len() % self.batch_size.get() != 0 {
            return Ok(false);
        }
        self.sink.flush(&self.records).await?;
        info!(rows = self.records.len(), "Saved checkpoint");
        Ok(true)
    }

    /// Final unconditional flush; returns the records and the sink.
    pub async fn finish(mut self) -> Result<(Vec<ListingRecord>, F), Box<dyn Error>> {
        self.sink.flush(&self.records).await?;
        info!(rows = self.records.len(), "Final save");
        Ok((self.records, self.sink))
    }
}

/// Counters reported at the end of a crawl.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    pub locations: usize,
    pub pages: usize,
    pub listings_seen: usize,
    pub records: usize,
}

/// Drives the page loop for every location.
pub struct CrawlDriver<S, F> {
    source: S,
    checkpoint: Checkpoint<F>,
    search_terms: String,
    page_delay: Duration,
}

impl<S, F> CrawlDriver<S, F>
where
    S: ListingSource,
    F: FlushStrategy,
{
    pub fn new(
        source: S,
        checkpoint: Checkpoint<F>,
        search_terms: impl Into<String>,
        page_delay: Duration,
    ) -> Self {
        Self {
            source,
            checkpoint,
            search_terms: search_terms.into(),
            page_delay,
        }
    }

    /// Crawl every location in order and flush the remainder at the end.
    ///
    /// # Returns
    ///
    /// The crawl summary together with the flush strategy, so callers can
    /// inspect what was written.
    ///
    /// # Errors
    ///
    /// Only flush failures are returned as errors; request failures never
    /// stop the crawl.
    #[instrument(level = "info", skip_all, fields(locations = locations.len()))]
    pub async fn run(mut self, locations: &[Location]) -> Result<(CrawlSummary, F), Box<dyn Error>> {
        let mut summary = CrawlSummary::default();
        for location in locations {
            self.crawl_location(location, &mut summary).await?;
            summary.locations += 1;
        }
        let (records, sink) = self.checkpoint.finish().await?;
        summary.records = records.len();
        info!(?summary, "Crawl complete");
        Ok((summary, sink))
    }

    async fn crawl_location(
        &mut self,
        location: &Location,
        summary: &mut CrawlSummary,
    ) -> Result<(), Box<dyn Error>> {
        let query = location.query();
        // No page cap: a server that never returns an empty page keeps this
        // loop going.
        let mut page = 1u32;
        loop {
            info!(location = %query, page, "Scraping location page");
            let urls = self.source.fetch_page(&self.search_terms, &query, page).await;
            if urls.is_empty() {
                return Ok(());
            }
            summary.pages += 1;
            for url in &urls {
                summary.listings_seen += 1;
                if let Some(record) = self.source.scrape_listing(url).await {
                    self.checkpoint.push(record).await?;
                }
            }
            page += 1;
            sleep(self.page_delay).await;
        }
    }
}
