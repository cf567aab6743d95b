use std::time::Instant;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::html;
use crate::types::Document;

const USER_AGENT: &str = concat!("wordfreq/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },
}

/// Blocking HTTP client shared by every request of a run
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Ignores proxy environment variables; tests talk to loopback servers.
    #[cfg(test)]
    pub fn direct() -> Self {
        let client = Client::builder().user_agent(USER_AGENT).no_proxy().build().unwrap();
        Self { client }
    }

    /// Download `url` and return its text; HTML pages are reduced to their visible text.
    pub fn fetch_text(&self, url: &Url) -> Result<Document, FetchError> {
        info!("fetching {}", url);
        let start = Instant::now();

        let response = self.client.get(url.as_str()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text()?;
        info!(
            "received {} bytes ({}) in {:.2?}",
            body.len(),
            content_type.as_deref().unwrap_or("no content type"),
            start.elapsed()
        );

        let text = match content_type.as_deref() {
            Some(ct) if html::is_html(ct) => {
                let start = Instant::now();
                let text = html::extract_text(&body);
                debug!(
                    "html text extraction: {} -> {} bytes in {:.2?}",
                    body.len(),
                    text.len(),
                    start.elapsed()
                );
                text
            }
            _ => body,
        };

        Ok(Document {
            url: url.to_string(),
            content_type,
            text,
        })
    }
}
