//! Snapshot rendering
//!
//! Writes each leaf's main content region verbatim to
//! `<base>/<collection>/<last path segment>.html`.

use crate::book::MAIN_CONTENT;
use crate::output::traits::Visitor;
use crate::{LoreError, Result};
use scraper::{Html, Selector};
use std::path::{Path, PathBuf};
use url::Url;

/// Visitor that stores the main content of every leaf as an HTML file
#[derive(Debug)]
pub struct SnapshotWriter {
    base_dir: PathBuf,
    collection: String,
    written: Vec<PathBuf>,
}

impl SnapshotWriter {
    /// Creates a writer for one collection under `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>, collection: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            collection: collection.into(),
            written: Vec::new(),
        }
    }

    /// Files written so far, in visit order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Visitor for SnapshotWriter {
    fn visit(&mut self, document: &Html, url: &Url) -> Result<()> {
        let content = main_content_html(document).ok_or_else(|| LoreError::MissingContent {
            url: url.to_string(),
        })?;

        let path = snapshot_path(&self.base_dir, &self.collection, url)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;

        tracing::debug!("Wrote snapshot of {} to {}", url, path.display());
        self.written.push(path);
        Ok(())
    }
}

/// Outer HTML of the page's main content container
fn main_content_html(document: &Html) -> Option<String> {
    let selector = Selector::parse(MAIN_CONTENT).ok()?;
    document.select(&selector).next().map(|element| element.html())
}

/// Computes `<base_dir>/<collection>/<last non-empty path segment>.html`
///
/// # Errors
///
/// `LoreError::SnapshotPath` when the URL has no non-empty path segment.
pub fn snapshot_path(base_dir: &Path, collection: &str, url: &Url) -> Result<PathBuf> {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .filter(|s| *s != "." && *s != "..")
        .ok_or_else(|| LoreError::SnapshotPath {
            url: url.to_string(),
        })?;

    Ok(base_dir
        .join(collection)
        .join(format!("{}.html", segment)))
}
