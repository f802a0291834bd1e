//! Headless Chrome implementation of [`PageRenderer`]

use std::time::Duration;

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::debug;

use crate::error::RenderError;
use crate::traits::{PageRenderer, RenderRequest};

/// Slack on top of the page timeouts before Chrome's idle watchdog fires
const IDLE_MARGIN: Duration = Duration::from_secs(30);

/// Launches a throwaway Chrome process for every page load
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeRenderer;

impl ChromeRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PageRenderer for ChromeRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<String, RenderError> {
        let request = request.clone();
        tokio::task::spawn_blocking(move || render_blocking(&request)).await?
    }
}

fn render_blocking(request: &RenderRequest) -> Result<String, RenderError> {
    let timeouts = request.timeouts;

    let options = LaunchOptions::default_builder()
        .headless(true)
        .sandbox(false)
        .idle_browser_timeout(timeouts.navigation + timeouts.readiness + IDLE_MARGIN)
        .build()
        .map_err(|e| RenderError::Launch(e.to_string()))?;

    // Dropping `browser` kills the Chrome process, so every return path below
    // releases the session.
    let browser = Browser::new(options).map_err(|e| RenderError::Launch(e.to_string()))?;
    let tab = browser
        .new_tab()
        .map_err(|e| RenderError::Launch(e.to_string()))?;

    let result = load_page(&tab, request);

    if let Err(e) = tab.close(true) {
        debug!("Failed to close tab for {}: {}", request.url, e);
    }

    result
}

fn load_page(tab: &Tab, request: &RenderRequest) -> Result<String, RenderError> {
    let timeouts = request.timeouts;

    tab.set_user_agent(&request.user_agent, None, None).map_err(tab_setup_error)?;
    tab.set_default_timeout(timeouts.navigation);

    tab.navigate_to(&request.url)
        .and_then(|tab| tab.wait_until_navigated())
        .map_err(|e| RenderError::Navigation {
            url: request.url.clone(),
            timeout: timeouts.navigation,
            reason: e.to_string(),
        })?;

    tab.wait_for_element_with_custom_timeout(&request.ready_selector, timeouts.readiness)
        .map_err(|_| RenderError::NotReady {
            selector: request.ready_selector.clone(),
            timeout: timeouts.readiness,
        })?;

    tab.get_content()
        .map_err(|e| RenderError::Content(e.to_string()))
}

fn tab_setup_error(e: anyhow::Error) -> RenderError {
    RenderError::TabSetup(e.to_string())
}
