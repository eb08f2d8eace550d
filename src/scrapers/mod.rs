//! Upstream HTTP collaborators.
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | Business directory | [`directory`] | HTML scraping of search and listing pages |
//! | Overpass API | [`overpass`] | JSON query per city |
//!
//! Both clients swallow request failures: they log and return "no data"
//! rather than surfacing an error to the pipelines.

pub mod directory;
pub mod overpass;

use reqwest::Client;
use std::error::Error;

/// Build the shared HTTP client, sending `user_agent` on every request.
pub fn build_client(user_agent: &str) -> Result<Client, Box<dyn Error>> {
    Ok(Client::builder().user_agent(user_agent.to_string()).build()?)
}
