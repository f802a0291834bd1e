//! Bounded retry loop around a single site's search page

use std::time::Duration;

use tracing::{info, warn};

use crate::models::Listing;
use crate::scraper::SiteExtractor;
use crate::traits::{FetchTimeouts, PageRenderer, RenderRequest, USER_AGENT};

/// How many times a site is retried and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 1,
            backoff: Duration::from_secs(5),
        }
    }
}

/// Where a site fetch is in its retry cycle. Attempts are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Attempting(u32),
    Retrying(u32),
    Success,
    GivenUp,
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// State following the outcome of attempt number `attempt`
    pub fn next_state(&self, attempt: u32, succeeded: bool) -> AttemptState {
        if succeeded {
            AttemptState::Success
        } else if attempt < self.max_attempts() {
            AttemptState::Retrying(attempt)
        } else {
            AttemptState::GivenUp
        }
    }
}

/// Load one site's search page and extract its listings, retrying on
/// failure.
///
/// A failed load and a page with zero listings both count as a failed
/// attempt. Once the policy is exhausted the site contributes nothing; this
/// never returns an error.
pub async fn fetch_with_retry(
    renderer: &dyn PageRenderer,
    extractor: &SiteExtractor,
    policy: &RetryPolicy,
    timeouts: FetchTimeouts,
) -> Vec<Listing> {
    let name = &extractor.config().name;
    let request = RenderRequest {
        url: extractor.search_url().to_string(),
        ready_selector: extractor.config().ready_selector.clone(),
        user_agent: USER_AGENT.to_string(),
        timeouts,
    };

    info!("[{}] Starting scrape of {}", name, request.url);

    let mut state = AttemptState::Attempting(1);
    let mut listings = Vec::new();

    loop {
        state = match state {
            AttemptState::Attempting(attempt) => {
                listings = attempt_once(renderer, extractor, &request).await;
                policy.next_state(attempt, !listings.is_empty())
            }
            AttemptState::Retrying(attempt) => {
                info!(
                    "[{}] Retrying in {}s (attempt {}/{})",
                    name,
                    policy.backoff.as_secs(),
                    attempt + 1,
                    policy.max_attempts()
                );
                tokio::time::sleep(policy.backoff).await;
                AttemptState::Attempting(attempt + 1)
            }
            AttemptState::Success => {
                info!("[{}] ✅ Found {} items", name, listings.len());
                return listings;
            }
            AttemptState::GivenUp => {
                warn!(
                    "[{}] Giving up after {} attempts",
                    name,
                    policy.max_attempts()
                );
                return Vec::new();
            }
        };
    }
}

async fn attempt_once(
    renderer: &dyn PageRenderer,
    extractor: &SiteExtractor,
    request: &RenderRequest,
) -> Vec<Listing> {
    let name = &extractor.config().name;

    match renderer.render(request).await {
        Ok(html) => {
            let listings = extractor.listings(&html);
            if listings.is_empty() {
                warn!("[{}] Page loaded but no listings were extracted", name);
            }
            listings
        }
        Err(e) => {
            warn!("[{}] ❌ Failed to load: {}", name, e);
            Vec::new()
        }
    }
}
