//! Page fetching
//!
//! This module defines the page source seam used by the traversal engine and
//! its HTTP implementation:
//! - Building the HTTP client
//! - GET requests that fail on non-success status codes
//! - Error classification into transport and decode failures

use crate::{LoreError, Result};
use reqwest::Client;
use std::future::Future;
use url::Url;

/// Source of raw page markup
///
/// Traversal only ever needs "give me the body at this URL"; the HTTP client
/// is one implementation, an in-memory map is another.
pub trait PageSource {
    /// Fetches the body of the page at `url`
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String>>;
}

/// Builds the HTTP client used for crawling
///
/// Requests carry reqwest's default headers. There is no retry, and no
/// timeout beyond the transport's own.
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    Client::builder().gzip(true).brotli(true).build()
}

/// Page source backed by HTTP GET requests
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Creates a source with a freshly built client
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
        })
    }

    /// Creates a source around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageSource for HttpSource {
    /// # Errors
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Connection/transport failure | `LoreError::Http` |
    /// | Non-2xx status | `LoreError::Status` |
    /// | Body not decodable as text | `LoreError::HtmlParse` |
    async fn fetch(&self, url: &Url) -> Result<String> {
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| LoreError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoreError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_decode() {
                LoreError::HtmlParse {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            } else {
                LoreError::Http {
                    url: url.to_string(),
                    source: e,
                }
            }
        })
    }
}
