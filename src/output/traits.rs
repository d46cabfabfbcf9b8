//! Visitor trait
//!
//! This module defines the interface the traversal engine hands leaf pages to.

use crate::Result;
use scraper::Html;
use url::Url;

/// Receives every leaf page reached by a traversal
///
/// Traversal calls `visit` exactly once per distinct leaf, in depth-first
/// pre-order. Returning an error aborts the rest of the traversal; leaves
/// already visited are not revisited or undone.
pub trait Visitor {
    /// Handles one leaf page
    ///
    /// # Arguments
    ///
    /// * `document` - The parsed leaf page
    /// * `url` - The absolute URL the page was fetched from
    fn visit(&mut self, document: &Html, url: &Url) -> Result<()>;
}
