use log::debug;
use std::time::Duration;

use crate::auth::{self, LoginHandler};
use crate::config::{ScraperConfig, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::error::ScrapeError;
use crate::fetchers::HttpFetcher;
use crate::model::FinalRecord;
use crate::pipeline;

/// Builder for configuring a [`RecipeScraper`]
#[derive(Debug, Default)]
pub struct RecipeScraperBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
    wild_mode: Option<bool>,
}

impl RecipeScraperBuilder {
    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_scraper::RecipeScraper;
    /// use std::time::Duration;
    ///
    /// let scraper = RecipeScraper::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build();
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the User-Agent header sent with every request
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Allow or refuse hosts missing from the supported-host list
    ///
    /// With wild mode off, pages from unlisted hosts fail with
    /// [`ScrapeError::UnsupportedHost`] instead of being read through their
    /// schema.org data.
    ///
    /// # Example
    /// ```
    /// use recipe_scraper::RecipeScraper;
    ///
    /// let scraper = RecipeScraper::builder().wild_mode(false).build();
    /// assert!(!scraper.wild_mode());
    /// ```
    pub fn wild_mode(mut self, enabled: bool) -> Self {
        self.wild_mode = Some(enabled);
        self
    }

    /// Take every setting not already set from `config`
    pub fn from_config(self, config: &ScraperConfig) -> Self {
        Self {
            timeout: self
                .timeout
                .or(Some(Duration::from_secs(config.timeout))),
            user_agent: self.user_agent.or_else(|| Some(config.user_agent.clone())),
            wild_mode: self.wild_mode.or(Some(config.wild_mode)),
        }
    }

    pub fn build(self) -> RecipeScraper {
        RecipeScraper {
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            wild_mode: self.wild_mode.unwrap_or(true),
        }
    }
}

/// Configured entry point for scraping
#[derive(Debug, Clone)]
pub struct RecipeScraper {
    timeout: Duration,
    user_agent: String,
    wild_mode: bool,
}

impl Default for RecipeScraper {
    fn default() -> Self {
        RecipeScraperBuilder::default().build()
    }
}

impl RecipeScraper {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_scraper::RecipeScraper;
    ///
    /// let builder = RecipeScraper::builder();
    /// ```
    pub fn builder() -> RecipeScraperBuilder {
        RecipeScraperBuilder::default()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn wild_mode(&self) -> bool {
        self.wild_mode
    }

    /// Scrape a page that was already fetched
    ///
    /// `final_url` is the URL the page was served from after redirects, when
    /// it differs from `request_url`.
    pub fn scrape_from_html(
        &self,
        html: &str,
        request_url: &str,
        final_url: Option<&str>,
    ) -> Result<FinalRecord, ScrapeError> {
        pipeline::process(html, request_url, final_url, self.wild_mode)
    }

    /// Fetch `url` and scrape it
    ///
    /// # Example
    /// ```no_run
    /// use recipe_scraper::RecipeScraper;
    ///
    /// let record = RecipeScraper::default()
    ///     .scrape_from_url("https://www.allrecipes.com/recipe/10813/")
    ///     .unwrap();
    /// println!("{:?}", record.raw.title);
    /// ```
    pub fn scrape_from_url(&self, url: &str) -> Result<FinalRecord, ScrapeError> {
        pipeline::check_url(url)?;

        let page = self.fetcher()?.fetch(url)?;
        self.scrape_from_html(&page.html, url, Some(&page.final_url))
    }

    /// Log in with the handler registered for the URL's host, then scrape it
    pub fn scrape_authenticated(
        &self,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<FinalRecord, ScrapeError> {
        pipeline::check_url(url)?;

        let host = auth::normalize_host(url);
        let handler = auth::get_handler(&host)
            .ok_or(ScrapeError::UnsupportedAuthSite { host })?;
        self.scrape_authenticated_with(handler, url, username, password)
    }

    /// Log in with `handler`, then scrape `url` in the same session
    ///
    /// The page is still checked for a login wall, so an expired or partial
    /// session reports [`ScrapeError::AuthenticationRequired`].
    pub fn scrape_authenticated_with(
        &self,
        handler: &dyn LoginHandler,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<FinalRecord, ScrapeError> {
        pipeline::check_url(url)?;

        let fetcher = self.fetcher()?;
        if !handler.login(fetcher.client(), username, password) {
            return Err(ScrapeError::AuthenticationFailed {
                host: auth::normalize_host(url),
            });
        }
        debug!("Logged in through {}, fetching {}", handler.login_url(), url);

        let page = fetcher.fetch(url)?;
        self.scrape_from_html(&page.html, url, Some(&page.final_url))
    }

    /// A fresh client per call so sessions are never shared
    fn fetcher(&self) -> Result<HttpFetcher, ScrapeError> {
        HttpFetcher::new(Some(self.timeout), Some(&self.user_agent))
    }
}
