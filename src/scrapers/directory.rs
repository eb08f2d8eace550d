//! Business directory scraper.
//!
//! Two page kinds are scraped:
//!
//! 1. **Search pages**: `?search_terms=..&geo_location_terms=..&page=N`, where
//!    each `div.result` container links to one listing.
//! 2. **Listing pages**: one business each, with the contact fields spread
//!    over a heading, a `section#details-card` and a handful of classed links.
//!
//! Markup parsing is split from fetching so the extraction rules can be
//! exercised on static HTML.

use crate::models::ListingRecord;
use crate::utils::{element_text, stripped_text, truncate_for_log};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

static RESULT_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("div.result"));
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("a[href]"));
static NAME_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("h1.business-name"));
static PHONE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("p.phone"));
static DETAILS_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("section#details-card"));
static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("p"));
static WEBSITE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("a.other-links"));
static SOCIAL_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("a.general-social-links"));

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector is valid CSS")
}

/// A social profile link, classified by the platform named in its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialLink<'a> {
    LinkedIn(&'a str),
    Facebook(&'a str),
    Other(&'a str),
}

impl<'a> SocialLink<'a> {
    /// Classify a link target by substring. LinkedIn is checked first, so a
    /// target naming both platforms counts as LinkedIn.
    pub fn classify(href: &'a str) -> Self {
        if href.contains("linkedin") {
            SocialLink::LinkedIn(href)
        } else if href.contains("facebook") {
            SocialLink::Facebook(href)
        } else {
            SocialLink::Other(href)
        }
    }
}

/// Extract listing URLs from a search results page.
///
/// Takes the first link of every `div.result` container and resolves it
/// against `base`. Containers without a resolvable link are skipped.
pub fn parse_search_results(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut urls = Vec::new();
    for result in document.select(&RESULT_SELECTOR) {
        let Some(href) = result
            .select(&LINK_SELECTOR)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };
        match base.join(href) {
            Ok(resolved) => urls.push(resolved.to_string()),
            Err(e) => debug!(%href, error = %e, "Skipping unresolvable result link"),
        }
    }
    urls
}

/// Best-effort lookup of the paragraph that follows an anchor paragraph.
///
/// Walks the paragraphs of `container` in document order, finds the first
/// one matching `is_anchor`, and returns the stripped text of the paragraph
/// after it. Returns `None` when no paragraph matches or the match is the
/// last paragraph. Any markup reshuffle silently yields `None`.
///
/// Text nodes of the address paragraph are joined with single spaces, so
/// `12 Main St<br>Springfield` reads `12 Main St Springfield` rather than
/// running the lines together.
pub fn find_address_near<F>(container: ElementRef<'_>, is_anchor: F) -> Option<String>
where
    F: Fn(&ElementRef<'_>) -> bool,
{
    let mut paragraphs = container.select(&PARAGRAPH_SELECTOR);
    paragraphs.find(|p| is_anchor(p))?;
    paragraphs.next().map(stripped_text)
}

fn is_phone_paragraph(p: &ElementRef<'_>) -> bool {
    p.value().classes().any(|class| class == "phone")
}

/// Extract a [`ListingRecord`] from a listing page.
///
/// Each field is looked up independently; a missing element leaves its field
/// `None`.
pub fn parse_listing(html: &str) -> ListingRecord {
    let document = Html::parse_document(html);

    let mut record = ListingRecord {
        company_name: document.select(&NAME_SELECTOR).next().map(element_text),
        phone: document.select(&PHONE_SELECTOR).next().map(element_text),
        address: document
            .select(&DETAILS_SELECTOR)
            .next()
            .and_then(|details| find_address_near(details, is_phone_paragraph)),
        website_url: document
            .select(&WEBSITE_SELECTOR)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| href.trim().to_string()),
        ..ListingRecord::default()
    };

    for link in document.select(&SOCIAL_SELECTOR) {
        let href = link.value().attr("href").unwrap_or("");
        match SocialLink::classify(href) {
            SocialLink::LinkedIn(url) => record.linkedin_url = Some(url.to_string()),
            SocialLink::Facebook(url) => record.facebook_url = Some(url.to_string()),
            SocialLink::Other(_) => {}
        }
    }

    record
}

/// HTTP front end for the directory site.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: Client,
    search_url: Url,
}

impl DirectoryClient {
    pub fn new(client: Client, search_url: Url) -> Self {
        Self { client, search_url }
    }

    /// Fetch one search results page and return its listing URLs.
    ///
    /// Any request failure is logged and reported as an empty page, the same
    /// as running out of results.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_page(&self, search_terms: &str, location: &str, page: u32) -> Vec<String> {
        match self.search(search_terms, location, page).await {
            Ok(body) => {
                let urls = parse_search_results(&body, &self.search_url);
                if urls.is_empty() {
                    info!("No result containers; end of results");
                } else {
                    debug!(count = urls.len(), "Parsed search results");
                }
                urls
            }
            Err(e) => {
                // Indistinguishable from exhaustion for the caller; a throttled
                // response also ends the location.
                warn!(url = %self.search_url, error = %e, "Search request failed");
                Vec::new()
            }
        }
    }

    async fn search(
        &self,
        search_terms: &str,
        location: &str,
        page: u32,
    ) -> Result<String, Box<dyn Error>> {
        let page = page.to_string();
        let body = self
            .client
            .get(self.search_url.clone())
            .query(&[
                ("search_terms", search_terms),
                ("geo_location_terms", location),
                ("page", page.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }

    /// Fetch and parse a single listing page. `None` marks a failed request.
    #[instrument(level = "info", skip(self))]
    pub async fn scrape_listing(&self, url: &str) -> Option<ListingRecord> {
        let body = match self.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "Listing request failed");
                return None;
            }
        };
        let record = parse_listing(&body);
        if record.company_name.is_none() {
            debug!(body = %truncate_for_log(&body, 300), "Listing page had no business name");
        }
        Some(record)
    }

    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}
