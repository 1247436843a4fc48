use log::debug;
use reqwest::blocking::Client;
use std::time::Duration;

use crate::config::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::error::ScrapeError;

/// A page as served after redirects.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,
    pub final_url: String,
}

/// Blocking HTTP client with its own cookie jar.
///
/// The jar lives as long as the fetcher, so a login performed through
/// [`HttpFetcher::client`] carries over to later fetches.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>, user_agent: Option<&str>) -> Result<Self, ScrapeError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .cookie_store(true)
            .build()?;

        Ok(Self { client })
    }

    /// Session shared with login handlers.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// GET `url`, following redirects. Non-2xx responses are errors.
    pub fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        let response = self.client.get(url).send()?;
        debug!("GET {} -> {} ({})", url, response.status(), response.url());

        let response = response.error_for_status()?;
        let final_url = response.url().to_string();
        let html = response.text()?;
        Ok(FetchedPage { html, final_url })
    }
}
