//! Crawler module for walking the book archive
//!
//! This module contains the core crawling logic, including:
//! - Page fetching behind the `PageSource` seam
//! - Depth-first traversal of series index pages down to book leaves
//! - Collection listings that seed traversal

mod fetcher;
mod listing;
mod traversal;

pub use fetcher::{build_http_client, HttpSource, PageSource};
pub use listing::find_listing_links;
pub use traversal::{find_navigation_links, parse_document, TraversalSummary, Traverser};
