//! Recipe scraping with heuristic clean-up and login-wall detection.
//!
//! Pages are read through their schema.org Recipe data, then corrected with
//! what the markup reveals: structured ingredients and instruction groups,
//! better images, serving sizes and tidier text fields. Pages that turn out
//! to be a login form fail with [`ScrapeError::AuthenticationRequired`]
//! instead of producing an empty recipe.
//!
//! ```
//! let html = r#"<html><head><script type="application/ld+json">
//!   {"@type": "Recipe", "name": "pancakes", "recipeIngredient": ["2 eggs"]}
//! </script></head></html>"#;
//!
//! let record = recipe_scraper::scrape_from_html(html, "https://example.com/pancakes", true, None)?;
//! assert_eq!(record.raw.title.as_deref(), Some("Pancakes"));
//! # Ok::<(), recipe_scraper::ScrapeError>(())
//! ```

pub mod auth;
pub mod builder;
pub mod cleaners;
pub mod config;
mod dom;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod image;
pub mod ingredients;
pub mod instructions;
pub mod linked_data;
pub mod model;
pub mod nutrition;
pub mod pipeline;
pub mod response;
pub mod sanitize;
pub mod tags;

pub use auth::{detect_auth_wall, LoginHandler, QuitoqueLoginHandler};
pub use builder::{RecipeScraper, RecipeScraperBuilder};
pub use config::{load_config, ScraperConfig};
pub use error::{ExtractorError, ScrapeError};
pub use extractors::{RecipeExtractor, SchemaOrgExtractor};
pub use model::{
    AuthWallResult, FinalRecord, IngredientGroup, NutrientTable, RawExtractedRecord,
    StructuredIngredient, StructuredInstructionGroup,
};
pub use response::ScrapeResponse;

/// Scrape an already fetched page with the default settings
pub fn scrape_from_html(
    html: &str,
    request_url: &str,
    wild_mode: bool,
    final_url: Option<&str>,
) -> Result<FinalRecord, ScrapeError> {
    pipeline::process(html, request_url, final_url, wild_mode)
}

/// Fetch and scrape `url` with the default settings
pub fn scrape_from_url(url: &str, wild_mode: bool) -> Result<FinalRecord, ScrapeError> {
    RecipeScraper::builder()
        .wild_mode(wild_mode)
        .build()
        .scrape_from_url(url)
}

/// Log in to the site of `url` and scrape it with the default settings
pub fn scrape_authenticated(
    url: &str,
    username: &str,
    password: &str,
    wild_mode: bool,
) -> Result<FinalRecord, ScrapeError> {
    RecipeScraper::builder()
        .wild_mode(wild_mode)
        .build()
        .scrape_authenticated(url, username, password)
}

/// Hosts with known schema.org support, sorted
pub fn list_supported_hosts() -> Vec<String> {
    extractors::supported_hosts()
}

/// Whether `host` is a supported host, ignoring case
pub fn is_host_supported(host: &str) -> bool {
    extractors::is_supported(host)
}

/// Hosts that have a login handler
pub fn list_auth_hosts() -> Vec<String> {
    auth::auth_hosts()
}
