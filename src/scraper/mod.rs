//! Generic product-grid extractor driven by per-site CSS selectors

use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

use crate::models::Listing;
use crate::normalize::{KeywordFilter, discount_pct, parse_price};
use crate::traits::ScraperConfig;

/// Why a product container did not produce a listing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no title element")]
    MissingTitle,
    #[error("no price element")]
    MissingPrice,
    #[error("title `{0}` does not match the keyword filter")]
    KeywordMismatch(String),
    #[error("price `{0}` has no digits")]
    UnparseablePrice(String),
}

/// Outcome for one product container on a results page
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Kept(Listing),
    Skipped(SkipReason),
}

/// Turns a rendered search page into listings for one site
pub struct SiteExtractor {
    config: ScraperConfig,
    filter: KeywordFilter,
    search_url: String,
    product_selector: Selector,
    title_selector: Selector,
    price_selector: Selector,
    list_price_selector: Option<Selector>,
    link_selector: Option<Selector>,
}

impl SiteExtractor {
    /// Compile the site's selectors for the given search term.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured selector is not valid CSS.
    pub fn new(config: ScraperConfig, filter: KeywordFilter, search_term: &str) -> Result<Self> {
        let selectors = &config.selectors;

        let product_selector = parse_selector("product", &selectors.product_container)?;
        let title_selector = parse_selector("title", &selectors.title)?;
        let price_selector = parse_selector("price", &selectors.price)?;
        let list_price_selector = selectors
            .list_price
            .as_deref()
            .map(|s| parse_selector("list price", s))
            .transpose()?;
        let link_selector = selectors
            .link
            .as_deref()
            .map(|s| parse_selector("link", s))
            .transpose()?;

        let search_url = config.build_search_url(search_term);

        Ok(Self {
            config,
            filter,
            search_url,
            product_selector,
            title_selector,
            price_selector,
            list_price_selector,
            link_selector,
        })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// Walk every product container in `document`, in page order.
    ///
    /// The traversal is read-only, so calling this again on the same
    /// document yields the same sequence.
    pub fn extract<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = Extraction> + 'a {
        document
            .select(&self.product_selector)
            .map(move |product| match self.extract_product(product) {
                Ok(listing) => Extraction::Kept(listing),
                Err(reason) => Extraction::Skipped(reason),
            })
    }

    /// Parse `html` and collect the listings that survived extraction
    pub fn listings(&self, html: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);

        let mut listings = Vec::new();
        let mut skipped = 0usize;
        for extraction in self.extract(&document) {
            match extraction {
                Extraction::Kept(listing) => listings.push(listing),
                Extraction::Skipped(reason) => {
                    debug!("[{}] skipped candidate: {}", self.config.name, reason);
                    skipped += 1;
                }
            }
        }

        debug!(
            "[{}] kept {} candidates, skipped {}",
            self.config.name,
            listings.len(),
            skipped
        );
        listings
    }

    fn extract_product(&self, product: ElementRef<'_>) -> Result<Listing, SkipReason> {
        let title_el = product
            .select(&self.title_selector)
            .next()
            .ok_or(SkipReason::MissingTitle)?;
        let price_el = product
            .select(&self.price_selector)
            .next()
            .ok_or(SkipReason::MissingPrice)?;

        let title = element_text(title_el);
        if title.is_empty() {
            return Err(SkipReason::MissingTitle);
        }
        if !self.filter.matches(&title) {
            return Err(SkipReason::KeywordMismatch(title));
        }

        let price_text = element_text(price_el);
        let price = parse_price(&price_text).ok_or(SkipReason::UnparseablePrice(price_text))?;

        let list_price = self
            .list_price_selector
            .as_ref()
            .and_then(|sel| product.select(sel).next())
            .and_then(|el| parse_price(&element_text(el)))
            .map_or(price, |list_price| list_price.max(price));

        let link = self
            .link_selector
            .as_ref()
            .and_then(|sel| product.select(sel).next())
            .and_then(|el| el.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map_or_else(
                || self.search_url.clone(),
                |href| resolve_link(&self.config.base_url, href),
            );

        Ok(Listing {
            site: self.config.site,
            title,
            price,
            list_price,
            discount_pct: discount_pct(price, list_price),
            link: Some(link),
        })
    }
}

fn parse_selector(what: &str, css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} selector `{}`: {:?}", what, css, e))
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Make `href` absolute against the site's base URL
fn resolve_link(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else if href.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), href)
    }
}
