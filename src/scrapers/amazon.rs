//! Amazon.in search results

use crate::models::Site;
use crate::traits::{ScraperConfig, SiteSelectors};

pub fn config() -> ScraperConfig {
    ScraperConfig {
        site: Site::Amazon,
        name: "AMAZON".to_string(),
        base_url: "https://www.amazon.in".to_string(),
        search_url_pattern: "https://www.amazon.in/s?k={query}".to_string(),
        ready_selector: "div.s-main-slot".to_string(),
        selectors: SiteSelectors {
            product_container: "div.s-main-slot div[data-asin]".to_string(),
            title: "h2 span".to_string(),
            price: "span.a-price-whole".to_string(),
            list_price: Some("span.a-price.a-text-price span.a-offscreen".to_string()),
            link: Some("h2 a, a.a-link-normal.s-no-outline".to_string()),
        },
    }
}
