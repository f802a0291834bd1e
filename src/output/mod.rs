//! JSON snapshot of the latest run

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::models::ScrapeReport;

/// Writes the scrape report to a single JSON file, replacing the previous run
#[derive(Debug, Clone)]
pub struct JsonWriter {
    path: PathBuf,
}

impl JsonWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `report` as pretty-printed UTF-8 JSON, creating the parent
    /// directory first if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn write(&self, report: &ScrapeReport) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(report)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        info!("Wrote {} products to {}", report.total, self.path.display());
        Ok(())
    }
}
