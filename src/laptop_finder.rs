use std::collections::HashSet;

use anyhow::Result;
use tracing::{debug, info};

use crate::config::FinderConfig;
use crate::fetch::fetch_with_retry;
use crate::models::{Listing, ScrapeReport};
use crate::output::JsonWriter;
use crate::scraper::SiteExtractor;
use crate::traits::PageRenderer;

pub struct LaptopFinder {
    config: FinderConfig,
    extractors: Vec<SiteExtractor>,
    renderer: Box<dyn PageRenderer>,
    writer: JsonWriter,
}

impl LaptopFinder {
    /// # Errors
    ///
    /// Returns an error if a site's selectors fail to compile.
    pub fn new(config: FinderConfig, renderer: Box<dyn PageRenderer>) -> Result<Self> {
        let extractors = config
            .sites
            .iter()
            .map(|site| {
                SiteExtractor::new(site.clone(), config.keywords.clone(), &config.search_query)
            })
            .collect::<Result<Vec<_>>>()?;
        let writer = JsonWriter::new(&config.output_path);

        if !config.keywords.is_empty() {
            info!("Keeping only titles that match every configured keyword group");
        }

        Ok(Self {
            config,
            extractors,
            renderer,
            writer,
        })
    }

    /// Scrape every site in order and return the merged, deduplicated
    /// listings, best discount first.
    pub async fn collect(&self) -> Vec<Listing> {
        let mut merged = Vec::new();

        for extractor in &self.extractors {
            let listings = fetch_with_retry(
                self.renderer.as_ref(),
                extractor,
                &self.config.retry,
                self.config.timeouts,
            )
            .await;
            debug!("{} contributed {} listings", extractor.config().site, listings.len());
            merged.extend(listings);
        }

        let mut listings = dedupe_by_title(merged);
        sort_by_discount(&mut listings);
        listings
    }

    /// Scrape, then overwrite the output file with the fresh report.
    ///
    /// # Errors
    ///
    /// Only a failure to write the output file is returned; site failures
    /// just leave that site's listings out.
    pub async fn run(&self) -> Result<ScrapeReport> {
        let report = ScrapeReport::new(self.collect().await);
        self.writer.write(&report).await?;

        info!(
            "✅ Scraping complete. Saved {} products to {}",
            report.total,
            self.writer.path().display()
        );
        Ok(report)
    }
}

/// Drop every listing whose exact title was already seen, keeping the first
pub fn dedupe_by_title(listings: Vec<Listing>) -> Vec<Listing> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .filter(|listing| seen.insert(listing.title.clone()))
        .collect()
}

/// Highest discount first; equal discounts keep their current order
pub fn sort_by_discount(listings: &mut [Listing]) {
    listings.sort_by(|a, b| b.discount_pct.total_cmp(&a.discount_pct));
}
