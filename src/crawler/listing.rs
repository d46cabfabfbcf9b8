//! Collection listings
//!
//! Each top-level collection publishes a "by-title" listing whose entries link
//! to the roots of its book trees. Crawling a collection means walking every
//! entry, in listing order, as one traversal session.

use crate::crawler::fetcher::PageSource;
use crate::crawler::traversal::{resolve_links, TraversalSummary, Traverser};
use crate::output::Visitor;
use crate::Result;
use scraper::Html;
use url::Url;

/// Entry links on a collection's by-title listing
const LISTING_LINKS: &str = "#content > div > div:nth-of-type(2) > div > ul > li > span > span > a";

/// Extracts the entry links of a collection listing, in listing order
pub fn find_listing_links(document: &Html, site_root: &Url) -> Result<Vec<Url>> {
    resolve_links(document, LISTING_LINKS, site_root)
}

impl<S: PageSource> Traverser<S> {
    /// Crawls every book reachable from a collection's listing page
    ///
    /// # Arguments
    ///
    /// * `name` - Collection name, for logging
    /// * `listing_url` - URL of the collection's by-title listing
    /// * `visitor` - Receives every leaf page
    ///
    /// # Returns
    ///
    /// * `Ok(TraversalSummary)` - Counters across all listing entries
    /// * `Err(LoreError)` - The listing or any entry failed
    pub async fn crawl_collection<V: Visitor>(
        &self,
        name: &str,
        listing_url: &Url,
        visitor: &mut V,
    ) -> Result<TraversalSummary> {
        tracing::info!("Crawling collection '{}' from {}", name, listing_url);

        let listing = self.fetch_document(listing_url).await?;
        let entries = find_listing_links(&listing, self.site_root())?;
        drop(listing);

        if entries.is_empty() {
            tracing::warn!("Listing for '{}' has no entries", name);
            return Ok(TraversalSummary::default());
        }

        tracing::info!("Collection '{}' lists {} entries", name, entries.len());

        let summary = self.traverse_all(&entries, visitor).await?;

        tracing::info!(
            "Collection '{}' done: {} books from {} pages ({} revisits skipped)",
            name,
            summary.leaf_pages,
            summary.pages_fetched(),
            summary.revisits
        );

        Ok(summary)
    }
}
