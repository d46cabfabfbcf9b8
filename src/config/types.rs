use crate::{ConfigError, ConfigResult};
use serde::Deserialize;
use url::Url;

/// Main configuration structure for Lorekeeper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub output: OutputConfig,
    #[serde(default, rename = "collection")]
    pub collections: Vec<CollectionEntry>,
}

/// The archive being crawled
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Root URL that navigation links are resolved against
    pub root: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Base directory for snapshot mode
    #[serde(rename = "snapshot-dir")]
    pub snapshot_dir: String,
}

/// One top-level collection and the URL of its listing page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectionEntry {
    /// Collection name, also used as the snapshot subdirectory
    pub name: String,

    /// Absolute URL of the collection's by-title listing
    pub url: String,
}

impl Config {
    /// Returns the parsed site root
    pub fn site_root(&self) -> ConfigResult<Url> {
        parse_absolute_url(&self.site.root)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid site root: {}", e)))
    }
}

impl CollectionEntry {
    /// Returns the parsed listing URL
    pub fn listing_url(&self) -> ConfigResult<Url> {
        parse_absolute_url(&self.url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid URL for collection '{}': {}", self.name, e))
        })
    }
}

/// Parses a URL and requires an http(s) scheme with a host
pub(crate) fn parse_absolute_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| format!("'{}': {}", raw, e))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("'{}' must use http or https", raw));
    }

    if url.host_str().is_none() {
        return Err(format!("'{}' has no host", raw));
    }

    Ok(url)
}
