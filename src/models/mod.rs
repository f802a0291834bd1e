//! Data models for laptop listings and the persisted scrape report

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A storefront the finder knows how to scrape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Site {
    Amazon,
    Flipkart,
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amazon => write!(f, "Amazon"),
            Self::Flipkart => write!(f, "Flipkart"),
        }
    }
}

/// A laptop listing scraped from a search results page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub site: Site,
    pub title: String,
    /// Selling price in the site's local currency
    pub price: u64,
    /// Price before discount, equal to `price` when the site shows none
    pub list_price: u64,
    pub discount_pct: f64,
    pub link: Option<String>,
}

/// The JSON document written at the end of each run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeReport {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub products: Vec<Listing>,
}

impl ScrapeReport {
    pub fn new(products: Vec<Listing>) -> Self {
        Self {
            generated_at: Utc::now(),
            total: products.len(),
            products,
        }
    }
}
