//! Tuning settings loaded from an optional YAML file.
//!
//! Every key is optional; anything missing falls back to the production
//! endpoints and pacing below.
//!
//! ```yaml
//! search_url: https://www.yellowpages.com/search
//! overpass_url: https://overpass-api.de/api/interpreter
//! batch_size: 100
//! page_delay_ms: 2000
//! ```

use serde::Deserialize;
use std::error::Error;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

pub const DEFAULT_SEARCH_URL: &str = "https://www.yellowpages.com/search";
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(100).unwrap();
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory search endpoint; result links are resolved against it.
    pub search_url: String,
    /// Overpass interpreter endpoint.
    pub overpass_url: String,
    pub user_agent: String,
    /// Records between two checkpoint flushes; `0` fails to deserialize.
    pub batch_size: NonZeroUsize,
    /// Pause after each non-empty search page.
    pub page_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            page_delay_ms: 2000,
        }
    }
}

impl Settings {
    /// Parse settings from YAML text and validate them.
    pub fn from_yaml(yaml: &str) -> Result<Self, Box<dyn Error>> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`, or the defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is not valid YAML, carries a
    /// zero `batch_size` or an endpoint that does not parse as a URL.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let yaml = fs::read_to_string(path).await?;
        let settings = Self::from_yaml(&yaml)?;
        info!(path = %path.display(), ?settings, "Loaded settings");
        Ok(settings)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    fn validate(&self) -> Result<(), Box<dyn Error>> {
        url::Url::parse(&self.search_url)?;
        url::Url::parse(&self.overpass_url)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = Settings::from_yaml("batch_size: 25\npage_delay_ms: 0\n").unwrap();
        assert_eq!(settings.batch_size.get(), 25);
        assert_eq!(settings.page_delay(), Duration::ZERO);
        assert_eq!(settings.search_url, DEFAULT_SEARCH_URL);
        assert_eq!(settings.overpass_url, DEFAULT_OVERPASS_URL);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        assert!(Settings::from_yaml("batch_size: 0\n").is_err());
        assert!(Settings::from_yaml("batch_size: 1\n").is_ok());
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(Settings::from_yaml("search_url: not a url\n").is_err());
    }

    #[tokio::test]
    async fn test_load_without_path_uses_defaults() {
        let settings = Settings::load(None).await.unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.page_delay(), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "overpass_url: http://127.0.0.1:9/api\n").unwrap();
        let settings = Settings::load(Some(&path)).await.unwrap();
        assert_eq!(settings.overpass_url, "http://127.0.0.1:9/api");
        assert_eq!(settings.batch_size, DEFAULT_BATCH_SIZE);
    }
}
