//! Per-site scraper configurations

pub mod amazon;
pub mod flipkart;

use crate::traits::ScraperConfig;

/// Every supported site, in the order they are scraped
pub fn all() -> Vec<ScraperConfig> {
    vec![amazon::config(), flipkart::config()]
}
