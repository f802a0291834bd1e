//! Run configuration, read from the environment (and `.env` via `dotenvy`)
//!
//! | Variable                  | Default              |
//! |---------------------------|----------------------|
//! | `OUTPUT_FILE`             | `data/products.json` |
//! | `SEARCH_QUERY`            | `laptop`             |
//! | `SCRAPE_RETRIES`          | `1`                  |
//! | `RETRY_BACKOFF_SECS`      | `5`                  |
//! | `NAVIGATION_TIMEOUT_SECS` | `60`                 |
//! | `READY_TIMEOUT_SECS`      | `30`                 |
//! | `KEYWORD_GROUPS`          | none (no filtering)  |
//!
//! `KEYWORD_GROUPS` uses `;` between groups and `,` between keywords, e.g.
//! `4060,4070;intel,i5,i7`.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::fetch::RetryPolicy;
use crate::normalize::KeywordFilter;
use crate::scrapers;
use crate::traits::{FetchTimeouts, ScraperConfig};

pub const DEFAULT_OUTPUT_FILE: &str = "data/products.json";
pub const DEFAULT_SEARCH_QUERY: &str = "laptop";

#[derive(Debug, Clone)]
pub struct FinderConfig {
    pub output_path: PathBuf,
    pub search_query: String,
    pub retry: RetryPolicy,
    pub timeouts: FetchTimeouts,
    pub keywords: KeywordFilter,
    /// Scraped in this order; earlier sites win title collisions
    pub sites: Vec<ScraperConfig>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            search_query: DEFAULT_SEARCH_QUERY.to_string(),
            retry: RetryPolicy::default(),
            timeouts: FetchTimeouts::default(),
            keywords: KeywordFilter::default(),
            sites: scrapers::all(),
        }
    }
}

impl FinderConfig {
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but not a number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup, falling back to
    /// defaults for missing keys.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but not a number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let output_path = lookup("OUTPUT_FILE").map_or(defaults.output_path, PathBuf::from);
        let search_query = lookup("SEARCH_QUERY")
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .unwrap_or(defaults.search_query);

        let retry = RetryPolicy {
            retries: parse_var(&lookup, "SCRAPE_RETRIES")?.unwrap_or(defaults.retry.retries),
            backoff: parse_var(&lookup, "RETRY_BACKOFF_SECS")?
                .map_or(defaults.retry.backoff, Duration::from_secs),
        };

        let timeouts = FetchTimeouts {
            navigation: parse_var(&lookup, "NAVIGATION_TIMEOUT_SECS")?
                .map_or(defaults.timeouts.navigation, Duration::from_secs),
            readiness: parse_var(&lookup, "READY_TIMEOUT_SECS")?
                .map_or(defaults.timeouts.readiness, Duration::from_secs),
        };

        let keywords = lookup("KEYWORD_GROUPS")
            .map_or(defaults.keywords, |raw| KeywordFilter::parse(&raw));

        Ok(Self {
            output_path,
            search_query,
            retry,
            timeouts,
            keywords,
            sites: defaults.sites,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("{key} must be a non-negative integer, got `{raw}`"))
        })
        .transpose()
}
