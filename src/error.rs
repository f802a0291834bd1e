//! Errors raised while loading a search page in the browser

use std::time::Duration;

use thiserror::Error;

/// Why a single page load attempt failed.
///
/// All of these are recoverable: the fetch loop retries or gives up on the
/// site, it never aborts the run.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("could not configure tab: {0}")]
    TabSetup(String),

    #[error("navigation to {url} failed within {timeout:?}: {reason}")]
    Navigation {
        url: String,
        timeout: Duration,
        reason: String,
    },

    #[error("ready marker `{selector}` did not appear within {timeout:?}")]
    NotReady { selector: String, timeout: Duration },

    #[error("could not read page content: {0}")]
    Content(String),

    #[error("browser task aborted: {0}")]
    Task(#[from] tokio::task::JoinError),
}
