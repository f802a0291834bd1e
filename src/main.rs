use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod browser;
mod config;
mod error;
mod fetch;
mod laptop_finder;
mod models;
mod normalize;
mod output;
mod scraper;
mod scrapers;
mod traits;

#[cfg(test)]
mod testing;

use browser::ChromeRenderer;
use config::FinderConfig;
use laptop_finder::LaptopFinder;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = FinderConfig::from_env()?;
    info!(
        "Starting laptop deal scrape for '{}' across {} sites",
        config.search_query,
        config.sites.len()
    );

    let finder = LaptopFinder::new(config, Box::new(ChromeRenderer::new()))?;
    finder.run().await?;

    Ok(())
}
