//! Traits and interfaces for website-agnostic scraping

use std::time::Duration;

use async_trait::async_trait;

use crate::error::RenderError;
use crate::models::Site;

/// User agent presented by every browser session
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for a website scraper
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Which storefront listings from this config are tagged with
    pub site: Site,
    /// Display name used as the log prefix
    pub name: String,
    /// Base URL used to absolutize relative product links
    pub base_url: String,
    /// Search URL pattern with {query} placeholder
    pub search_url_pattern: String,
    /// Element that must exist before the page is considered usable
    pub ready_selector: String,
    /// CSS selectors for extracting data
    pub selectors: SiteSelectors,
}

impl ScraperConfig {
    /// Fill the `{query}` placeholder with the URL-encoded search term
    pub fn build_search_url(&self, search_term: &str) -> String {
        let encoded_term = urlencoding::encode(search_term);
        self.search_url_pattern.replace("{query}", &encoded_term)
    }
}

/// CSS selectors for different parts of a product listing
#[derive(Debug, Clone)]
pub struct SiteSelectors {
    /// Container selector for individual products
    pub product_container: String,
    /// Title/name selector within product container
    pub title: String,
    /// Selling price selector within product container
    pub price: String,
    /// Struck-through list price selector (optional)
    pub list_price: Option<String>,
    /// Product link selector within product container (optional)
    pub link: Option<String>,
}

/// Time limits for a single page load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTimeouts {
    pub navigation: Duration,
    pub readiness: Duration,
}

impl Default for FetchTimeouts {
    fn default() -> Self {
        Self {
            navigation: Duration::from_secs(60),
            readiness: Duration::from_secs(30),
        }
    }
}

/// Everything a renderer needs to load one search page
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub url: String,
    pub ready_selector: String,
    pub user_agent: String,
    pub timeouts: FetchTimeouts,
}

/// Capability to load a URL in a real browser and hand back the rendered markup.
///
/// Every call must use a fresh, isolated browsing session and release it
/// before returning, whether the load succeeded or not.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, request: &RenderRequest) -> Result<String, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers;

    #[test]
    fn search_url_encodes_query() {
        let config = scrapers::amazon::config();
        assert_eq!(
            config.build_search_url("gaming laptop"),
            "https://www.amazon.in/s?k=gaming%20laptop"
        );
    }

    #[test]
    fn default_timeouts() {
        let timeouts = FetchTimeouts::default();
        assert_eq!(timeouts.navigation, Duration::from_secs(60));
        assert_eq!(timeouts.readiness, Duration::from_secs(30));
    }
}
