//! Hierarchical traversal of the book archive
//!
//! The archive is a tree of series index pages whose leaves are books. A page
//! is an index when its book-navigation menu lists children, and a leaf when it
//! does not. Traversal is depth-first, visits leaves in pre-order following the
//! menu order at every level, and fetches strictly one page at a time.

use crate::config::Config;
use crate::crawler::fetcher::PageSource;
use crate::output::Visitor;
use crate::{LoreError, Result};
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use url::Url;

/// Child links of a series index page
const NAVIGATION_LINKS: &str = ".book-navigation > ul.menu > li > a";

/// Counters for one traversal session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalSummary {
    /// Index pages whose children were followed
    pub index_pages: usize,

    /// Leaf pages handed to the visitor
    pub leaf_pages: usize,

    /// Links skipped because their URL was already seen in this session
    pub revisits: usize,
}

impl TraversalSummary {
    /// Total number of pages fetched
    pub fn pages_fetched(&self) -> usize {
        self.index_pages + self.leaf_pages
    }
}

/// State scoped to one top-level traversal call
#[derive(Debug, Default)]
struct Session {
    seen: HashSet<Url>,
    summary: TraversalSummary,
}

type WalkFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a>>;

/// Depth-first walker over the archive's navigation tree
///
/// # Example
///
/// ```no_run
/// use lorekeeper::config::Config;
/// use lorekeeper::crawler::{HttpSource, Traverser};
/// use lorekeeper::output::RecordCollector;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let traverser = Traverser::from_config(HttpSource::new()?, &Config::builtin()?)?;
/// let start = traverser.site_root().join("/content/wolf-queen")?;
///
/// let mut collector = RecordCollector::new();
/// let summary = traverser.traverse(&start, &mut collector).await?;
/// println!("{} books", summary.leaf_pages);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Traverser<S> {
    source: S,
    site_root: Url,
}

impl<S: PageSource> Traverser<S> {
    /// Creates a traverser that resolves navigation links against `site_root`
    pub fn new(source: S, site_root: Url) -> Self {
        Self { source, site_root }
    }

    /// Creates a traverser rooted at the configured site root
    pub fn from_config(source: S, config: &Config) -> Result<Self> {
        Ok(Self::new(source, config.site_root()?))
    }

    /// The root navigation links are resolved against
    pub fn site_root(&self) -> &Url {
        &self.site_root
    }

    /// Walks the tree rooted at `url`, visiting every leaf once
    ///
    /// # Returns
    ///
    /// * `Ok(TraversalSummary)` - Every reachable leaf was visited
    /// * `Err(LoreError)` - A fetch, parse, link or visitor error; nothing past
    ///   the failing page in pre-order was fetched or visited
    pub async fn traverse<V: Visitor>(
        &self,
        url: &Url,
        visitor: &mut V,
    ) -> Result<TraversalSummary> {
        self.traverse_all(std::slice::from_ref(url), visitor).await
    }

    /// Walks several trees in order as one session
    ///
    /// A URL reached a second time anywhere in the session is skipped, so a
    /// cycle in the link graph terminates and a shared leaf yields one visit.
    pub async fn traverse_all<V: Visitor>(
        &self,
        urls: &[Url],
        visitor: &mut V,
    ) -> Result<TraversalSummary> {
        let mut session = Session::default();

        for url in urls {
            self.walk(url.clone(), visitor, &mut session).await?;
        }

        tracing::debug!(
            "Traversal finished: {} index pages, {} leaves, {} revisits",
            session.summary.index_pages,
            session.summary.leaf_pages,
            session.summary.revisits
        );

        Ok(session.summary)
    }

    /// Fetches and parses the page at `url`
    pub async fn fetch_document(&self, url: &Url) -> Result<Html> {
        let body = self.source.fetch(url).await?;
        parse_document(&body, url)
    }

    fn walk<'a, V: Visitor>(
        &'a self,
        url: Url,
        visitor: &'a mut V,
        session: &'a mut Session,
    ) -> WalkFuture<'a>
    where
        S: 'a,
        V: 'a,
    {
        Box::pin(async move {
            if !session.seen.insert(url.clone()) {
                tracing::debug!("Skipping already visited {}", url);
                session.summary.revisits += 1;
                return Ok(());
            }

            let document = self.fetch_document(&url).await?;
            let links = find_navigation_links(&document, &self.site_root)?;

            if links.is_empty() {
                tracing::debug!("Visiting leaf {}", url);
                visitor.visit(&document, &url)?;
                session.summary.leaf_pages += 1;
                return Ok(());
            }

            drop(document);
            tracing::debug!("Index {} has {} children", url, links.len());
            session.summary.index_pages += 1;

            for link in links {
                self.walk(link, &mut *visitor, &mut *session).await?;
            }

            Ok(())
        })
    }
}

/// Parses a fetched body into a document
///
/// The HTML parser recovers from any malformed markup, so the only body that
/// fails is one with no markup at all.
pub fn parse_document(body: &str, url: &Url) -> Result<Html> {
    if body.trim().is_empty() {
        return Err(LoreError::HtmlParse {
            url: url.to_string(),
            message: "empty document".to_string(),
        });
    }

    Ok(Html::parse_document(body))
}

/// Extracts the child links of a series index page, in menu order
///
/// Anchors without an `href` are ignored. Links are resolved against
/// `site_root`. Schemes are not filtered: a `mailto:` or `javascript:` link
/// comes back as is, and fetching it fails, which aborts the traversal.
///
/// # Returns
///
/// * `Ok(Vec<Url>)` - Child links; empty for a leaf page
/// * `Err(LoreError::InvalidLink)` - An `href` could not be resolved
pub fn find_navigation_links(document: &Html, site_root: &Url) -> Result<Vec<Url>> {
    resolve_links(document, NAVIGATION_LINKS, site_root)
}

/// Resolves the `href` of every anchor matching `css` against `site_root`
pub(crate) fn resolve_links(document: &Html, css: &str, site_root: &Url) -> Result<Vec<Url>> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse(css) {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                let href = href.trim();
                let url = site_root.join(href).map_err(|source| LoreError::InvalidLink {
                    href: href.to_string(),
                    source,
                })?;
                links.push(url);
            }
        }
    }

    Ok(links)
}
