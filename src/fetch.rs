// src/fetch.rs

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ScrapeConfig;

/// Anything that can hand back the raw HTML listing one year's incidents.
pub trait PageSource {
    fn fetch_page(&self, year: i32) -> Result<String>;
}

/// Build the page URL for `year` from a prefix such as
/// `https://en.wikipedia.org/wiki/List_of_terrorist_incidents_in_`.
pub fn page_url(prefix: &str, year: i32) -> Result<Url> {
    let raw = format!("{}{}", prefix, year);
    Url::parse(&raw).with_context(|| format!("parsing page URL {}", raw))
}

/// Blocking HTTP fetcher for the Wikipedia yearly lists.
pub struct WikiClient {
    client: Client,
    prefix: String,
}

impl WikiClient {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        // the blocking client defaults to 30s; `None` waits indefinitely
        let mut builder = Client::builder().timeout(config.request_timeout);
        if let Some(ua) = &config.user_agent {
            builder = builder.user_agent(ua.as_str());
        }
        let client = builder.build().context("building HTTP client")?;
        // fail fast on a prefix that can never form a URL
        page_url(&config.url_prefix, config.start_year)?;
        Ok(Self {
            client,
            prefix: config.url_prefix.clone(),
        })
    }
}

impl PageSource for WikiClient {
    #[instrument(level = "info", skip(self))]
    fn fetch_page(&self, year: i32) -> Result<String> {
        let url = page_url(&self.prefix, year)?;
        debug!(%url, "fetching");
        let body = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", url))?
            .text()
            .with_context(|| format!("Reading text from {}", url))?;
        debug!(%url, bytes = body.len(), "fetched");
        Ok(body)
    }
}
