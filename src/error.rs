use thiserror::Error;

/// Errors that can occur while scraping a recipe page
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The page served a login form instead of the requested recipe
    #[error("This recipe requires authentication")]
    AuthenticationRequired { host: String },

    /// A login handler ran but the site rejected the credentials
    #[error("Login failed. Please check your credentials.")]
    AuthenticationFailed { host: String },

    /// No login handler is registered for the host
    #[error("Authentication not supported for {host}")]
    UnsupportedAuthSite { host: String },

    /// Wild mode is off and the host has no registered extractor support
    #[error("Website {host} is not supported (enable wild mode to try schema.org extraction)")]
    UnsupportedHost { host: String },

    /// Network error, timeout or non-2xx response
    #[error("Failed to fetch URL: {0}")]
    FetchFailure(#[from] reqwest::Error),

    /// The page was fetched but no recipe could be extracted from it
    #[error("Failed to extract recipe: {0}")]
    ExtractionFailure(String),
}

impl ScrapeError {
    /// Stable name of the failure, used as the `type` of the error envelope
    pub fn kind(&self) -> &'static str {
        match self {
            ScrapeError::AuthenticationRequired { .. } => "AuthenticationRequired",
            ScrapeError::AuthenticationFailed { .. } => "AuthenticationFailed",
            ScrapeError::UnsupportedAuthSite { .. } => "UnsupportedAuthSite",
            ScrapeError::UnsupportedHost { .. } => "UnsupportedHost",
            ScrapeError::FetchFailure(_) => "FetchFailure",
            ScrapeError::ExtractionFailure(_) => "ExtractionFailure",
        }
    }

    /// Host the failure relates to, when one is known
    pub fn host(&self) -> Option<&str> {
        match self {
            ScrapeError::AuthenticationRequired { host }
            | ScrapeError::AuthenticationFailed { host }
            | ScrapeError::UnsupportedAuthSite { host }
            | ScrapeError::UnsupportedHost { host } => Some(host),
            ScrapeError::FetchFailure(_) | ScrapeError::ExtractionFailure(_) => None,
        }
    }
}

/// Failure of a single extractor accessor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// The extractor has no way of producing this field
    #[error("{0} is not implemented by this extractor")]
    NotImplemented(&'static str),

    /// The field is present on the page but could not be interpreted
    #[error("Malformed {field}: {reason}")]
    Malformed { field: &'static str, reason: String },
}
