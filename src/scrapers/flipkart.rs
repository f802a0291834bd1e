//! Flipkart search results

use crate::models::Site;
use crate::traits::{ScraperConfig, SiteSelectors};

pub fn config() -> ScraperConfig {
    ScraperConfig {
        site: Site::Flipkart,
        name: "FLIPKART".to_string(),
        base_url: "https://www.flipkart.com".to_string(),
        search_url_pattern: "https://www.flipkart.com/search?q={query}".to_string(),
        ready_selector: "div._1YokD2".to_string(),
        selectors: SiteSelectors {
            product_container: "div._1AtVbE".to_string(),
            title: "div._4rR01T".to_string(),
            price: "div._30jeq3".to_string(),
            // Struck-through MRP next to the selling price
            list_price: Some("div._3I9_wc".to_string()),
            link: Some("a._1fQZEK".to_string()),
        },
    }
}
